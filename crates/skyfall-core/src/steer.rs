//! Steered dropper anchor.
//!
//! The dropper is the player-controlled object the falling entity is
//! released from. It moves horizontally along a fixed Y: velocity ramps
//! toward the input axis at the acceleration rate (deceleration rate when
//! the axis is released), the target X integrates the velocity, and the
//! rendered X follows the target through exponential smoothing. Both the
//! target and the rendered position are clamped to the arena bounds with a
//! configurable padding, so the dropper can never leave the playfield.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for the steered dropper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropperConfig {
    /// Maximum horizontal speed, units per second.
    pub move_speed: f32,
    /// Velocity ramp-up rate, in `move_speed` units per second.
    pub acceleration: f32,
    /// Velocity ramp-down rate when the axis is released.
    pub deceleration: f32,
    /// Extra clearance kept from the arena edges.
    pub padding: f32,
    /// Width of the dropper, for edge clamping.
    pub width: f32,
    /// Fixed Y the dropper travels along.
    pub home_y: f32,
    /// Vertical offset below the dropper where drops are released.
    pub drop_offset: f32,
}

impl Default for DropperConfig {
    fn default() -> Self {
        Self {
            move_speed: 500.0,
            acceleration: 5.0,
            deceleration: 8.0,
            padding: 50.0,
            width: 200.0,
            home_y: 300.0,
            drop_offset: 100.0,
        }
    }
}

/// Moves `current` toward `target` by at most `max_delta`.
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}

/// The player-steered dropper anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeredMover {
    x: f32,
    y: f32,
    velocity: f32,
    target_x: f32,
}

impl SteeredMover {
    /// Creates a dropper centered at X = 0 on the configured travel Y.
    #[must_use]
    pub fn new(config: &DropperConfig) -> Self {
        Self {
            x: 0.0,
            y: config.home_y,
            velocity: 0.0,
            target_x: 0.0,
        }
    }

    /// Advances the dropper by one tick.
    ///
    /// `axis` is the steering input in `[-1, 1]`; values outside are
    /// clamped. `min_x`/`max_x` are the arena bounds the dropper is kept
    /// inside (with the configured padding and half-width).
    pub fn tick(&mut self, axis: f32, dt: f32, config: &DropperConfig, min_x: f32, max_x: f32) {
        let axis = axis.clamp(-1.0, 1.0);

        if axis != 0.0 {
            self.velocity = move_towards(
                self.velocity,
                axis * config.move_speed,
                config.acceleration * config.move_speed * dt,
            );
        } else {
            self.velocity = move_towards(
                self.velocity,
                0.0,
                config.deceleration * config.move_speed * dt,
            );
        }

        self.target_x += self.velocity * dt;

        let lo = min_x + config.width / 2.0 + config.padding;
        let hi = max_x - config.width / 2.0 - config.padding;
        if lo <= hi {
            self.target_x = self.target_x.clamp(lo, hi);
        }

        // Exponential smoothing toward the target keeps the rendered
        // position slightly behind fast direction changes.
        let blend = (10.0 * dt).clamp(0.0, 1.0);
        self.x += (self.target_x - self.x) * blend;
        if lo <= hi {
            self.x = self.x.clamp(lo, hi);
        }
    }

    /// Returns the dropper's rendered position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the current horizontal velocity.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Returns the point a drop is released at, just below the dropper.
    #[must_use]
    pub fn drop_point(&self, config: &DropperConfig) -> Vec2 {
        Vec2::new(self.x, self.y - config.drop_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DropperConfig {
        DropperConfig::default()
    }

    #[test]
    fn new_dropper_rests_at_center() {
        let mover = SteeredMover::new(&config());
        assert_eq!(mover.position(), Vec2::new(0.0, 300.0));
        assert_eq!(mover.velocity(), 0.0);
    }

    #[test]
    fn steering_right_accelerates_and_moves_right() {
        let cfg = config();
        let mut mover = SteeredMover::new(&cfg);

        for _ in 0..30 {
            mover.tick(1.0, 1.0 / 60.0, &cfg, -500.0, 500.0);
        }

        assert!(mover.velocity() > 0.0);
        assert!(mover.position().x > 0.0);
    }

    #[test]
    fn releasing_the_axis_decelerates_to_rest() {
        let cfg = config();
        let mut mover = SteeredMover::new(&cfg);

        for _ in 0..30 {
            mover.tick(1.0, 1.0 / 60.0, &cfg, -500.0, 500.0);
        }
        for _ in 0..120 {
            mover.tick(0.0, 1.0 / 60.0, &cfg, -500.0, 500.0);
        }

        assert_eq!(mover.velocity(), 0.0);
    }

    #[test]
    fn dropper_is_clamped_inside_padded_bounds() {
        let cfg = config();
        let mut mover = SteeredMover::new(&cfg);

        // Steer hard right for far longer than the arena is wide.
        for _ in 0..600 {
            mover.tick(1.0, 1.0 / 60.0, &cfg, -500.0, 500.0);
        }

        let limit = 500.0 - cfg.width / 2.0 - cfg.padding;
        assert!(mover.position().x <= limit + 1e-3);
    }

    #[test]
    fn axis_input_is_clamped() {
        let cfg = config();
        let mut a = SteeredMover::new(&cfg);
        let mut b = SteeredMover::new(&cfg);

        a.tick(1.0, 0.1, &cfg, -500.0, 500.0);
        b.tick(5.0, 0.1, &cfg, -500.0, 500.0);

        assert_eq!(a.position(), b.position());
    }

    #[test]
    fn drop_point_is_below_the_dropper() {
        let cfg = config();
        let mover = SteeredMover::new(&cfg);

        let point = mover.drop_point(&cfg);
        assert_eq!(point, Vec2::new(0.0, cfg.home_y - cfg.drop_offset));
    }

    #[test]
    fn serialization_roundtrip() {
        let cfg = config();
        let mut mover = SteeredMover::new(&cfg);
        mover.tick(0.5, 0.1, &cfg, -500.0, 500.0);

        let json = serde_json::to_string(&mover).unwrap();
        let back: SteeredMover = serde_json::from_str(&json).unwrap();

        assert_eq!(mover, back);
    }
}
