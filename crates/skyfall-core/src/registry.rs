//! Registry of live entities.
//!
//! The registry is the container for every live entity in the arena. It
//! provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn/despawn, despawn idempotent)
//! - Width lookup with the default fallback
//! - Overlap diagnostics for logs and tests
//!
//! # Determinism
//!
//! Entity ids are monotonically increasing and the `BTreeMap`'s natural
//! ordering guarantees consistent iteration across platforms, which is what
//! pins down the collision engine's first-match rule.
//!
//! # Invariants
//!
//! Placed footprints are kept non-overlapping at insertion time by the
//! placement solver; the registry does not re-validate afterwards (placed
//! X coordinates never change once assigned). Mutation and query happen
//! only on the single simulation thread, so no locking is involved.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityInner};
use crate::placement::{min_required_distance, Footprint, PlacementBounds};
use crate::template::DEFAULT_FOOTPRINT_WIDTH;

/// Container for all live entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Monotonically increasing entity id counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entities: BTreeMap::new(),
        }
    }

    /// Registers a new entity and returns its assigned id.
    ///
    /// The kind tag is derived from the inner storage. Callers are
    /// responsible for having validated placement beforehand; the registry
    /// itself accepts any position.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(id, inner));
        id
    }

    /// Removes an entity, returning it if it was present.
    ///
    /// Despawning an id that is no longer (or never was) registered is a
    /// no-op returning `None`, so double despawns are harmless.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Returns a reference to an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by id.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns an iterator over entity ids in ascending order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over entities in id order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in id order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Returns the number of live entities of any kind.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of live placed entities.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.entities.values().filter(|e| e.is_placed()).count()
    }

    /// Returns true if no entities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Removes every entity. The id counter keeps running so recycled ids
    /// never alias old ones.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Returns an entity's footprint width, falling back to
    /// [`DEFAULT_FOOTPRINT_WIDTH`] for unknown ids and non-positive widths.
    #[must_use]
    pub fn width_of(&self, id: EntityId) -> f32 {
        self.entities
            .get(&id)
            .map_or(DEFAULT_FOOTPRINT_WIDTH, Entity::footprint_width)
    }

    /// Collects the footprints of all live placed entities, in id order,
    /// for the placement solver.
    #[must_use]
    pub fn placed_footprints(&self) -> Vec<Footprint> {
        self.entities
            .values()
            .filter_map(|entity| {
                entity
                    .as_placed()
                    .map(|c| Footprint::new(c.position.x, entity.footprint_width()))
            })
            .collect()
    }

    /// Pairwise overlap check over placed entities using bare half-width
    /// distances (no safety gap). Diagnostic only; a healthy registry
    /// always returns false.
    #[must_use]
    pub fn has_overlaps(&self) -> bool {
        let footprints = self.placed_footprints();
        for (i, a) in footprints.iter().enumerate() {
            for b in &footprints[i + 1..] {
                let distance = (a.x - b.x).abs();
                let required = a.width / 2.0 + b.width / 2.0;
                if distance < required {
                    return true;
                }
            }
        }
        false
    }

    /// Builds a human-readable placement summary: occupancy, bounds, and
    /// the pairwise distances between placed entities with their required
    /// minimums. Intended for logs and test output, not for parsing.
    #[must_use]
    pub fn placement_report(
        &self,
        bounds: PlacementBounds,
        capacity: usize,
        gap_ratio: f32,
    ) -> String {
        let placed: Vec<(EntityId, Footprint)> = self
            .entities
            .values()
            .filter_map(|entity| {
                entity.as_placed().map(|c| {
                    (
                        entity.id(),
                        Footprint::new(c.position.x, entity.footprint_width()),
                    )
                })
            })
            .collect();

        let mut report = String::new();
        let _ = writeln!(report, "placed: {}/{}", placed.len(), capacity);
        let _ = writeln!(report, "x range: {} to {}", bounds.min_x, bounds.max_x);

        if placed.is_empty() {
            let _ = writeln!(report, "no placed entities");
            return report;
        }

        for (i, (id, footprint)) in placed.iter().enumerate() {
            let _ = writeln!(
                report,
                "{id}: x={:.0}, width={:.0}",
                footprint.x, footprint.width
            );
            for (other_id, other) in placed.iter().skip(i + 1).map(|(id, f)| (id, f)) {
                let distance = (footprint.x - other.x).abs();
                let required = min_required_distance(footprint.width, other.width, gap_ratio);
                let status = if distance >= required { "ok" } else { "OVERLAP" };
                let _ = writeln!(
                    report,
                    "  -> {other_id}: distance={distance:.0}, required={required:.0}, {status}"
                );
            }
        }

        report
    }
}
