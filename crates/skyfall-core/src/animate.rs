//! Rise and fall motion primitives.
//!
//! All motion here is explicit state advanced by an elapsed-time delta.
//! There are no engine callbacks: a rise is a small struct that interpolates
//! Y over a fixed duration through an easing curve, and a fall is a constant
//! downward velocity applied each tick.
//!
//! # Completion semantics
//!
//! A completed rise snaps exactly to its target Y rather than stopping on
//! the last sampled value, so accumulated floating-point error in the
//! elapsed time never leaves an entity fractionally short of its resting
//! position.

use serde::{Deserialize, Serialize};

/// Shape of the rise interpolation on normalized time `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaseCurve {
    /// Straight interpolation, `f(t) = t`.
    Linear,
    /// Smooth start and stop with flat tangents at both ends,
    /// `f(t) = 3t^2 - 2t^3`.
    #[default]
    EaseInOut,
}

impl EaseCurve {
    /// Evaluates the curve at `t`, clamping `t` into `[0, 1]` first.
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// In-flight rise of a placed entity from its spawn Y to its resting Y.
///
/// One rise runs per entity at a time; installing a new `RiseAnimation`
/// replaces any previous one. Advance it once per tick with the elapsed
/// seconds and read back the current Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiseAnimation {
    start_y: f32,
    target_y: f32,
    duration: f32,
    curve: EaseCurve,
    elapsed: f32,
}

impl RiseAnimation {
    /// Creates a rise from `start_y` to `target_y` over `duration` seconds.
    ///
    /// A non-positive duration completes on the first advance.
    #[must_use]
    pub fn new(start_y: f32, target_y: f32, duration: f32, curve: EaseCurve) -> Self {
        Self {
            start_y,
            target_y,
            duration,
            curve,
            elapsed: 0.0,
        }
    }

    /// Advances the rise by `dt` seconds and returns the current Y.
    ///
    /// Once the full duration has elapsed the returned Y is exactly
    /// `target_y`, and [`Self::is_complete`] reports true.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.is_complete() {
            return self.target_y;
        }
        let t = self.elapsed / self.duration;
        let curved = self.curve.evaluate(t);
        self.start_y + (self.target_y - self.start_y) * curved
    }

    /// Returns true once the full duration has elapsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }

    /// Returns the Y this rise finishes at.
    #[must_use]
    pub const fn target_y(&self) -> f32 {
        self.target_y
    }
}

/// Applies one tick of constant-velocity fall to a Y coordinate.
#[must_use]
pub fn fall_step(y: f32, speed: f32, dt: f32) -> f32 {
    y - speed * dt
}
