//! Arena configuration.
//!
//! One struct carries every tunable recognized by the simulation. The
//! `Default` values are the reference tuning the arena was balanced around;
//! hosts override fields as needed and hand the struct to
//! [`Simulation::new`](crate::simulation::Simulation::new). Bounds are
//! immutable for the lifetime of a simulation.

use serde::{Deserialize, Serialize};

use crate::animate::EaseCurve;
use crate::placement::PlacementBounds;
use crate::steer::DropperConfig;
use crate::template::AssetId;

/// Configuration for a spawn-and-collision arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Left edge of the horizontal placement range.
    pub min_x: f32,
    /// Right edge of the horizontal placement range.
    pub max_x: f32,
    /// Y at which placed entities appear before rising.
    pub spawn_start_y: f32,
    /// Y below which a falling entity is removed without effect.
    pub destroy_y: f32,
    /// Downward speed of the falling entity, units per second.
    pub fall_speed: f32,
    /// Bounding-box width of the falling entity.
    pub falling_width: f32,
    /// Bounding-box height of the falling entity.
    pub falling_height: f32,
    /// Visual asset of the falling entity.
    pub falling_asset: AssetId,
    /// Seconds a hit target shows the highlight asset before removal.
    pub highlight_duration: f32,
    /// Asset swapped in while a hit target dwells.
    pub highlight_asset: AssetId,
    /// Maximum number of simultaneously placed entities.
    pub max_placed: usize,
    /// Whether activation spawns an initial burst.
    pub spawn_on_activate: bool,
    /// Number of entities in the activation burst.
    pub activate_spawn_count: u32,
    /// Seconds between successful burst spawns.
    pub activate_spawn_spacing: f32,
    /// Seconds between periodic spawn attempts; non-positive disables the
    /// periodic trigger.
    pub auto_spawn_interval: f32,
    /// Seconds a placed entity takes to rise to its resting Y.
    pub rise_duration: f32,
    /// Easing shape of the rise.
    pub rise_curve: EaseCurve,
    /// Edge margin as a fraction of the new entity's width.
    pub margin_ratio: f32,
    /// Pair gap as a fraction of the two entities' combined width.
    pub gap_ratio: f32,
    /// Steered dropper tuning.
    pub dropper: DropperConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            min_x: -500.0,
            max_x: 500.0,
            spawn_start_y: -200.0,
            destroy_y: -500.0,
            fall_speed: 100.0,
            falling_width: 100.0,
            falling_height: 100.0,
            falling_asset: AssetId::new("falling"),
            highlight_duration: 2.0,
            highlight_asset: AssetId::new("highlight"),
            max_placed: 3,
            spawn_on_activate: true,
            activate_spawn_count: 1,
            activate_spawn_spacing: 0.1,
            auto_spawn_interval: 2.0,
            rise_duration: 1.0,
            rise_curve: EaseCurve::EaseInOut,
            margin_ratio: 0.2,
            gap_ratio: 0.1,
            dropper: DropperConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Creates a config with the given horizontal bounds and reference
    /// defaults for everything else.
    #[must_use]
    pub fn with_bounds(min_x: f32, max_x: f32) -> Self {
        Self {
            min_x,
            max_x,
            ..Self::default()
        }
    }

    /// Returns the horizontal bounds as a [`PlacementBounds`].
    #[must_use]
    pub const fn placement_bounds(&self) -> PlacementBounds {
        PlacementBounds::new(self.min_x, self.max_x)
    }
}
