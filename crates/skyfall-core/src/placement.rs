//! Non-overlapping horizontal placement.
//!
//! The solver draws uniformly-random candidate X coordinates inside the
//! margin-adjusted bounds and accepts the first one that keeps a minimum
//! distance to every existing footprint. It never moves existing entities
//! and never blocks: after a fixed attempt budget it reports exhaustion and
//! the caller simply skips that spawn attempt.
//!
//! # Distance rule
//!
//! A candidate is accepted against an existing footprint when
//!
//! ```text
//! |candidate - existing.x| >= new_width/2 + existing.width/2 + gap
//! gap = gap_ratio * (new_width + existing.width)
//! ```
//!
//! The gap term is computed from the combined width and added once per pair
//! comparison. Tests pin this exact rule; do not fold it into a symmetric
//! per-side margin.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::SpawnError;

/// Candidate positions drawn before the solver reports exhaustion.
pub const PLACEMENT_ATTEMPTS: u32 = 100;

/// Immutable horizontal placement range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementBounds {
    /// Left edge of the range.
    pub min_x: f32,
    /// Right edge of the range.
    pub max_x: f32,
}

impl PlacementBounds {
    /// Creates a placement range.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32) -> Self {
        Self { min_x, max_x }
    }
}

/// Horizontal extent of one existing entity, as seen by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Center X of the entity.
    pub x: f32,
    /// Footprint width of the entity.
    pub width: f32,
}

impl Footprint {
    /// Creates a footprint.
    #[must_use]
    pub const fn new(x: f32, width: f32) -> Self {
        Self { x, width }
    }
}

/// Minimum center distance a new entity must keep from an existing one.
#[must_use]
pub fn min_required_distance(new_width: f32, existing_width: f32, gap_ratio: f32) -> f32 {
    let half_widths = new_width / 2.0 + existing_width / 2.0;
    let gap = gap_ratio * (new_width + existing_width);
    half_widths + gap
}

/// Margin-adjusted candidate range for an entity of the given width, or
/// `None` when the entity cannot fit between the margins at all.
fn candidate_range(
    bounds: PlacementBounds,
    width: f32,
    margin_ratio: f32,
) -> Option<(f32, f32)> {
    let half_width = width / 2.0;
    let margin = width * margin_ratio;
    let lo = bounds.min_x + half_width + margin;
    let hi = bounds.max_x - half_width - margin;
    (lo < hi).then_some((lo, hi))
}

/// Finds a free X coordinate for a new entity of `new_width`.
///
/// With no existing footprints the first draw is returned directly. With
/// existing footprints, up to [`PLACEMENT_ATTEMPTS`] candidates are drawn;
/// the first one satisfying the distance rule against every footprint wins.
///
/// # Errors
///
/// Returns [`SpawnError::PlacementExhausted`] when the attempt budget is
/// used up, and immediately (with zero attempts) when the margin-adjusted
/// range is empty because the entity is too wide for the bounds. Both are
/// "skip this spawn" conditions for the caller, never fatal.
pub fn find_free_x(
    existing: &[Footprint],
    new_width: f32,
    bounds: PlacementBounds,
    margin_ratio: f32,
    gap_ratio: f32,
    rng: &mut impl Rng,
) -> Result<f32, SpawnError> {
    let Some((lo, hi)) = candidate_range(bounds, new_width, margin_ratio) else {
        debug!(
            new_width,
            min_x = bounds.min_x,
            max_x = bounds.max_x,
            "entity too wide for margin-adjusted bounds"
        );
        return Err(SpawnError::PlacementExhausted { attempts: 0 });
    };

    if existing.is_empty() {
        let x = rng.gen_range(lo..hi);
        debug!(x, new_width, "placed first entity at random position");
        return Ok(x);
    }

    for attempt in 1..=PLACEMENT_ATTEMPTS {
        let candidate = rng.gen_range(lo..hi);

        let conflict = existing.iter().find(|footprint| {
            let distance = (candidate - footprint.x).abs();
            distance < min_required_distance(new_width, footprint.width, gap_ratio)
        });

        match conflict {
            None => {
                debug!(x = candidate, attempt, "found free position");
                return Ok(candidate);
            }
            Some(footprint) => {
                trace!(
                    candidate,
                    blocker_x = footprint.x,
                    required = min_required_distance(new_width, footprint.width, gap_ratio),
                    "candidate rejected"
                );
            }
        }
    }

    debug!(
        existing = existing.len(),
        attempts = PLACEMENT_ATTEMPTS,
        "no free position found"
    );
    Err(SpawnError::PlacementExhausted {
        attempts: PLACEMENT_ATTEMPTS,
    })
}
