//! Entity types for the arena simulation.
//!
//! This module provides:
//! - [`EntityId`]: unique, ordered identifier for live entities
//! - [`EntityKind`]: kind tag distinguishing placed targets from the
//!   falling entity
//! - [`EntityInner`]: type-safe storage for kind-specific components
//! - [`Entity`]: the complete entity container
//!
//! # Ordering
//!
//! Entity ids are assigned monotonically and ordered by value. Registry
//! iteration follows id order, which is what makes the collision engine's
//! first-match rule deterministic.

pub mod components;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{FallingComponents, PlacedComponents, StatusFlags};

use crate::template::DEFAULT_FOOTPRINT_WIDTH;

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. Ids are immutable once
/// assigned and unique within a registry for the lifetime of a simulation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Kind tag for a live entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Stationary target placed by the spawn scheduler.
    Placed,
    /// The single entity currently falling toward the targets.
    Falling,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed => write!(f, "Placed"),
            Self::Falling => write!(f, "Falling"),
        }
    }
}

/// Type-safe storage for kind-specific components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Components of a placed target.
    Placed(PlacedComponents),
    /// Components of the falling entity.
    Falling(FallingComponents),
}

impl EntityInner {
    /// Returns the kind tag matching this storage variant.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Placed(_) => EntityKind::Placed,
            Self::Falling(_) => EntityKind::Falling,
        }
    }

    /// Returns the placed components, if this is a placed entity.
    #[must_use]
    pub const fn as_placed(&self) -> Option<&PlacedComponents> {
        match self {
            Self::Placed(components) => Some(components),
            Self::Falling(_) => None,
        }
    }

    /// Returns mutable placed components, if this is a placed entity.
    #[must_use]
    pub fn as_placed_mut(&mut self) -> Option<&mut PlacedComponents> {
        match self {
            Self::Placed(components) => Some(components),
            Self::Falling(_) => None,
        }
    }

    /// Returns the falling components, if this is the falling entity.
    #[must_use]
    pub const fn as_falling(&self) -> Option<&FallingComponents> {
        match self {
            Self::Falling(components) => Some(components),
            Self::Placed(_) => None,
        }
    }

    /// Returns mutable falling components, if this is the falling entity.
    #[must_use]
    pub fn as_falling_mut(&mut self) -> Option<&mut FallingComponents> {
        match self {
            Self::Falling(components) => Some(components),
            Self::Placed(_) => None,
        }
    }
}

/// A complete live entity: id, kind tag, and kind-specific components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    inner: EntityInner,
}

impl Entity {
    /// Creates an entity; the kind tag is derived from the inner storage,
    /// so the two can never disagree.
    #[must_use]
    pub fn new(id: EntityId, inner: EntityInner) -> Self {
        Self {
            id,
            kind: inner.kind(),
            inner,
        }
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's kind tag.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns a reference to the kind-specific components.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the kind-specific components.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns true if this entity is a placed target.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self.kind, EntityKind::Placed)
    }

    /// Returns true if this entity is the falling entity.
    #[must_use]
    pub const fn is_falling(&self) -> bool {
        matches!(self.kind, EntityKind::Falling)
    }

    /// Returns the placed components if this is a placed target.
    #[must_use]
    pub const fn as_placed(&self) -> Option<&PlacedComponents> {
        self.inner.as_placed()
    }

    /// Returns mutable placed components if this is a placed target.
    #[must_use]
    pub fn as_placed_mut(&mut self) -> Option<&mut PlacedComponents> {
        self.inner.as_placed_mut()
    }

    /// Returns the falling components if this is the falling entity.
    #[must_use]
    pub const fn as_falling(&self) -> Option<&FallingComponents> {
        self.inner.as_falling()
    }

    /// Returns mutable falling components if this is the falling entity.
    #[must_use]
    pub fn as_falling_mut(&mut self) -> Option<&mut FallingComponents> {
        self.inner.as_falling_mut()
    }

    /// Returns the entity's current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        match &self.inner {
            EntityInner::Placed(c) => c.position,
            EntityInner::Falling(c) => c.position,
        }
    }

    /// Returns the entity's footprint width, falling back to the default
    /// when the stored width is non-positive.
    #[must_use]
    pub fn footprint_width(&self) -> f32 {
        let width = match &self.inner {
            EntityInner::Placed(c) => c.width,
            EntityInner::Falling(c) => c.width,
        };
        if width > 0.0 {
            width
        } else {
            DEFAULT_FOOTPRINT_WIDTH
        }
    }
}
