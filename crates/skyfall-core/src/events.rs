//! Events published by the simulation.
//!
//! The simulation has no rendering surface of its own; it narrates every
//! externally visible change through these events, drained once per tick.
//! A renderer replays them to create, move, restyle, and remove visuals,
//! and a scoreboard reads the running counter off
//! [`Event::TargetDestroyed`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::template::{AssetId, TemplateId};

/// One externally visible change in the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A placed entity entered the arena and began its rise.
    Spawned {
        /// The new entity.
        id: EntityId,
        /// Template it was spawned from.
        template: TemplateId,
        /// Asset to show.
        asset: AssetId,
        /// Initial position (X is final; Y animates upward from here).
        position: Vec2,
        /// Footprint width.
        width: f32,
    },
    /// A placed entity finished rising and settled at its resting Y.
    RiseCompleted {
        /// The settled entity.
        id: EntityId,
    },
    /// A falling entity was released from the dropper.
    FallStarted {
        /// The falling entity.
        id: EntityId,
        /// Asset to show.
        asset: AssetId,
        /// Release position.
        position: Vec2,
    },
    /// The falling entity left the arena without hitting anything.
    FallLost {
        /// The removed entity.
        id: EntityId,
    },
    /// The falling entity struck a placed target and was removed.
    Collision {
        /// The removed falling entity.
        falling: EntityId,
        /// The struck target, now entering its highlight window.
        target: EntityId,
    },
    /// A struck target began showing the highlight asset.
    HighlightStarted {
        /// The highlighted target.
        target: EntityId,
        /// Asset shown during the dwell window.
        asset: AssetId,
    },
    /// A struck target's dwell ended: its asset was restored and the
    /// entity removed.
    TargetDestroyed {
        /// The removed target.
        target: EntityId,
        /// Asset restored just before removal, when the target was still
        /// present.
        restored: Option<AssetId>,
        /// Running count of destroyed targets.
        destroyed_total: u32,
    },
    /// Every entity was removed at once.
    Cleared,
}
