//! Spawn templates and the identifiers that tie live entities back to them.
//!
//! A [`SpawnTemplate`] describes one kind of placeable entity: its visual
//! asset, its footprint width (used for overlap avoidance), its bounding-box
//! height, and the resting Y it rises to after placement. Templates are
//! provided to the simulation at construction time and addressed by
//! [`TemplateId`], which every spawned entity stores explicitly. Width
//! lookups therefore never depend on matching generated instance names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback footprint width, in arena units, for templates that declare a
/// non-positive width and for entities whose width cannot be resolved.
pub const DEFAULT_FOOTPRINT_WIDTH: f32 = 200.0;

/// Stable index of a template within the simulation's template list.
///
/// `TemplateId` is assigned when the template list is handed to the
/// simulation and stored on each entity at spawn time, so an entity's
/// template can always be resolved without string matching.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(usize);

impl TemplateId {
    /// Creates a template id from a raw list index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw list index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateId({})", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for TemplateId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

/// Opaque name of a visual asset.
///
/// The simulation never interprets asset names; it only stores them, swaps
/// them during the highlight window, and publishes them in events for a
/// renderer to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Creates an asset id from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the asset name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Description of one spawnable entity kind.
///
/// # Width semantics
///
/// `width` is the footprint used for overlap math. A non-positive value
/// means "unspecified" and resolves to [`DEFAULT_FOOTPRINT_WIDTH`] through
/// [`SpawnTemplate::footprint_width`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTemplate {
    /// Visual asset shown while the entity is in its normal state.
    pub asset: AssetId,
    /// Footprint width in arena units; non-positive means unspecified.
    pub width: f32,
    /// Bounding-box height in arena units.
    pub height: f32,
    /// Resting Y the entity rises to after placement.
    pub target_y: f32,
}

impl SpawnTemplate {
    /// Creates a template with the default width, height, and resting Y.
    #[must_use]
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            width: DEFAULT_FOOTPRINT_WIDTH,
            height: DEFAULT_FOOTPRINT_WIDTH,
            target_y: 0.0,
        }
    }

    /// Returns the template with its footprint width replaced.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Returns the template with its resting Y replaced.
    #[must_use]
    pub fn with_target_y(mut self, target_y: f32) -> Self {
        self.target_y = target_y;
        self
    }

    /// Resolves the footprint width, falling back to
    /// [`DEFAULT_FOOTPRINT_WIDTH`] when the declared width is non-positive.
    #[must_use]
    pub fn footprint_width(&self) -> f32 {
        if self.width > 0.0 {
            self.width
        } else {
            DEFAULT_FOOTPRINT_WIDTH
        }
    }
}
