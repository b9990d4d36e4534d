//! Component structs for the two entity kinds.
//!
//! The component structs hold all mutable state for a particular entity
//! kind. Positions live here and are written by the simulation's animation
//! and fall phases each tick; the X of a placed entity is fixed at
//! placement time and only its Y animates.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animate::RiseAnimation;
use crate::template::{AssetId, TemplateId};

bitflags! {
    /// Transient status flags on a placed entity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        /// The entity's entry rise is still in progress.
        const RISING = 1 << 0;
        /// The entity is showing the highlight asset during a dwell window.
        const HIGHLIGHTED = 1 << 1;
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Serde representation of [`StatusFlags`] as raw bits; unknown bits are
/// dropped on the way in.
mod status_flags_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::StatusFlags;

    pub fn serialize<S: Serializer>(flags: &StatusFlags, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(flags.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusFlags, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Ok(StatusFlags::from_bits_truncate(bits))
    }
}

/// Components for placed entities: the stationary targets that rise into
/// the arena and wait to be hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponents {
    /// Template this entity was spawned from.
    pub template: TemplateId,
    /// Current position; X is fixed after placement.
    pub position: Vec2,
    /// Footprint width used for overlap math.
    pub width: f32,
    /// Bounding-box height.
    pub height: f32,
    /// Resting Y the entity rises to.
    pub target_y: f32,
    /// Currently shown visual asset.
    pub asset: AssetId,
    /// Asset stashed while the highlight asset is shown.
    pub stashed_asset: Option<AssetId>,
    /// Transient status flags.
    #[serde(with = "status_flags_serde")]
    pub flags: StatusFlags,
    /// Entry rise, present while the entity is still rising.
    pub rise: Option<RiseAnimation>,
}

impl PlacedComponents {
    /// Creates placed components at a position with no rise installed.
    #[must_use]
    pub fn new(
        template: TemplateId,
        position: Vec2,
        width: f32,
        height: f32,
        target_y: f32,
        asset: AssetId,
    ) -> Self {
        Self {
            template,
            position,
            width,
            height,
            target_y,
            asset,
            stashed_asset: None,
            flags: StatusFlags::empty(),
            rise: None,
        }
    }

    /// Installs a rise animation, replacing any previous one, and marks the
    /// entity as rising.
    pub fn start_rise(&mut self, rise: RiseAnimation) {
        self.rise = Some(rise);
        self.flags.insert(StatusFlags::RISING);
    }
}

/// Components for the single falling entity dropped from the steered
/// anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingComponents {
    /// Current position; only Y changes while falling.
    pub position: Vec2,
    /// Bounding-box width.
    pub width: f32,
    /// Bounding-box height.
    pub height: f32,
    /// Visual asset of the falling entity.
    pub asset: AssetId,
}

impl FallingComponents {
    /// Creates falling components at a drop position.
    #[must_use]
    pub fn new(position: Vec2, width: f32, height: f32, asset: AssetId) -> Self {
        Self {
            position,
            width,
            height,
            asset,
        }
    }
}
