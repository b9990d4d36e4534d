//! Axis-aligned boxes and the bounding-box capability.
//!
//! Collision detection never reads entity internals directly; it goes
//! through [`BoundsSource`], the small capability that answers "what is
//! this entity's axis-aligned box in arena coordinates". The default
//! [`FootprintBounds`] derives boxes from an entity's position and stored
//! size; a rendering backend with richer layout information can substitute
//! its own implementation without touching the collision rule.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::registry::Registry;

/// Axis-aligned bounding box in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Bottom-left corner.
    pub min: Vec2,
    /// Top-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box centered on `center` with the given full size.
    #[must_use]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns true if the two boxes overlap. Boxes that merely touch on
    /// an edge do not count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Returns the box center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Capability that produces an entity's axis-aligned box in arena
/// coordinates.
///
/// Returning `None` means the entity has no usable box; collision testing
/// skips such entities instead of failing the tick.
pub trait BoundsSource {
    /// Returns the entity's box, or `None` when it cannot be derived.
    fn aabb_of(&self, entity: &Entity) -> Option<Aabb>;
}

/// Default bounds source: boxes are centered on the entity position with
/// the entity's stored width and height.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootprintBounds;

impl BoundsSource for FootprintBounds {
    fn aabb_of(&self, entity: &Entity) -> Option<Aabb> {
        let (position, width, height) = match entity.inner() {
            crate::entity::EntityInner::Placed(c) => (c.position, c.width, c.height),
            crate::entity::EntityInner::Falling(c) => (c.position, c.width, c.height),
        };
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Aabb::from_center_size(position, Vec2::new(width, height)))
    }
}

/// Finds the placed entity the falling entity currently overlaps, if any.
///
/// Placed entities are tested in registry (id) order and the first overlap
/// wins; there is no distance tie-break. Entities the bounds source cannot
/// produce a box for are skipped with a debug log. Returns `None` when the
/// falling entity itself has no box.
#[must_use]
pub fn find_collision(
    registry: &Registry,
    falling: EntityId,
    source: &dyn BoundsSource,
) -> Option<EntityId> {
    let falling_entity = registry.get(falling)?;
    let Some(falling_box) = source.aabb_of(falling_entity) else {
        debug!(id = %falling, "falling entity has no bounding box, skipping collision test");
        return None;
    };

    for entity in registry.entities_sorted() {
        if entity.id() == falling || !entity.is_placed() {
            continue;
        }
        match source.aabb_of(entity) {
            Some(target_box) if falling_box.overlaps(&target_box) => {
                return Some(entity.id());
            }
            Some(_) => {}
            None => {
                debug!(id = %entity.id(), "entity has no bounding box, skipped");
            }
        }
    }

    None
}
