//! Spawn scheduling.
//!
//! The scheduler decides when spawn attempts happen; it never performs them.
//! All of its state is plain timers advanced by the per-tick delta, so
//! cancellation is a field reset: there are no registered callbacks to leak
//! and stopping is safe to call any number of times, including from
//! teardown.
//!
//! # Triggers
//!
//! - **Burst** (on activation): a fixed number of attempts. A successful
//!   spawn waits the configured spacing before the next attempt; a failed
//!   attempt moves straight on to the next one within the same tick.
//! - **Periodic**: the first attempt fires immediately after starting, then
//!   one attempt per interval. Restartable; at most one attempt per tick.
//!
//! The manual fall trigger is not scheduled here; it arrives through the
//! tick input and is handled by the simulation directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Periodic spawn state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AutoSpawn {
    interval: f32,
    timer: f32,
}

/// Decides when spawn attempts are due.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Remaining attempts in the activation burst.
    burst_remaining: u32,
    /// Seconds until the next burst attempt may run.
    burst_timer: f32,
    /// Periodic trigger, when active.
    auto: Option<AutoSpawn>,
}

impl SpawnScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the activation burst with `count` attempts. The first attempt
    /// is due immediately.
    pub fn arm_burst(&mut self, count: u32) {
        self.burst_remaining = count;
        self.burst_timer = 0.0;
    }

    /// Starts (or restarts) periodic spawning with the given interval.
    /// The first attempt is due on the next tick. Non-positive intervals
    /// are ignored.
    pub fn start_auto(&mut self, interval: f32) {
        if interval <= 0.0 {
            debug!(interval, "ignoring non-positive auto-spawn interval");
            return;
        }
        self.auto = Some(AutoSpawn {
            interval,
            timer: 0.0,
        });
    }

    /// Stops periodic spawning. Idempotent; safe to call when the periodic
    /// trigger was never started.
    pub fn stop_auto(&mut self) {
        self.auto = None;
    }

    /// Returns true while the periodic trigger is running.
    #[must_use]
    pub fn auto_active(&self) -> bool {
        self.auto.is_some()
    }

    /// Returns the remaining attempts in the activation burst.
    #[must_use]
    pub const fn burst_remaining(&self) -> u32 {
        self.burst_remaining
    }

    /// Advances all timers by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.burst_remaining > 0 {
            self.burst_timer -= dt;
        }
        if let Some(auto) = &mut self.auto {
            auto.timer -= dt;
        }
    }

    /// Consumes one burst attempt if one is due. Call repeatedly within a
    /// tick: after a failed attempt the next one is due immediately.
    pub fn take_burst_attempt(&mut self) -> bool {
        if self.burst_remaining > 0 && self.burst_timer <= 0.0 {
            self.burst_remaining -= 1;
            true
        } else {
            false
        }
    }

    /// Records that a burst attempt spawned successfully, delaying the next
    /// attempt by `spacing` seconds.
    pub fn note_burst_spawned(&mut self, spacing: f32) {
        self.burst_timer = spacing;
    }

    /// Consumes the periodic attempt if one is due. At most one periodic
    /// attempt fires per tick.
    pub fn take_auto_attempt(&mut self) -> bool {
        match &mut self.auto {
            Some(auto) if auto.timer <= 0.0 => {
                auto.timer = auto.interval;
                true
            }
            _ => false,
        }
    }
}
