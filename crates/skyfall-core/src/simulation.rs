//! Simulation orchestrator with the per-tick phase loop.
//!
//! `Simulation` owns every piece of arena state and advances all of it from
//! a single `tick` entry point:
//!
//! 1. **SCHEDULE**: burst and periodic timers advance; due spawn attempts
//!    run (capacity check, template pick, placement, registration).
//! 2. **RISE**: in-flight entry animations advance; completed rises snap to
//!    their resting Y.
//! 3. **STEER**: the dropper follows the steering axis.
//! 4. **FALL**: the active falling entity moves down and is tested for
//!    collision; a hit starts the target's highlight dwell, the threshold
//!    removes the entity silently.
//! 5. **DROP**: a requested drop releases a new falling entity if none is
//!    active.
//! 6. **DWELL**: highlight windows count down; expired ones restore the
//!    target's asset, remove it, and bump the destroyed counter.
//!
//! # Determinism
//!
//! All randomness (template choice, placement candidates) flows through one
//! `ChaCha8Rng` seeded at construction. Registry iteration is id-ordered.
//! Same seed + same input sequence produces the identical event stream.
//!
//! # Failure model
//!
//! Spawn attempts fail silently: capacity, missing templates, and placement
//! exhaustion are logged and skipped, and the tick loop always runs to
//! completion. Nothing here panics on missing entities; a stale id is
//! treated as already removed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::animate::{fall_step, RiseAnimation};
use crate::config::ArenaConfig;
use crate::entity::{EntityId, EntityInner, FallingComponents, PlacedComponents, StatusFlags};
use crate::error::SpawnError;
use crate::events::Event;
use crate::geometry::{find_collision, FootprintBounds};
use crate::placement::find_free_x;
use crate::registry::Registry;
use crate::scheduler::SpawnScheduler;
use crate::steer::SteeredMover;
use crate::template::{SpawnTemplate, TemplateId};

// =============================================================================
// Tick input
// =============================================================================

/// External input for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Steering axis for the dropper, in `[-1, 1]`.
    pub steer_axis: f32,
    /// Request to release a falling entity. Ignored while one is active.
    pub drop: bool,
}

/// Highlight window pending on a struck target.
///
/// Dwells are independent of the fall that caused them: a new fall may
/// start, and hit something else, while earlier dwells are still counting
/// down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DwellTimer {
    target: EntityId,
    remaining: f32,
}

// =============================================================================
// Simulation
// =============================================================================

/// The arena simulation.
///
/// Construct with a configuration, a template list, and a master seed, then
/// call [`Simulation::tick`] once per frame with the elapsed seconds. The
/// returned events describe every externally visible change of that tick.
///
/// # Example
///
/// ```
/// use skyfall_core::config::ArenaConfig;
/// use skyfall_core::simulation::{Simulation, TickInput};
/// use skyfall_core::template::{AssetId, SpawnTemplate};
///
/// let templates = vec![SpawnTemplate::new(AssetId::new("tower"))];
/// let mut sim = Simulation::new(ArenaConfig::default(), templates, 42);
///
/// for _ in 0..60 {
///     let events = sim.tick(&TickInput::default(), 1.0 / 60.0);
///     for event in events {
///         // Forward to a renderer.
///         let _ = event;
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    /// Arena configuration, immutable for the simulation's lifetime.
    config: ArenaConfig,
    /// Spawnable entity templates, addressed by index.
    templates: Vec<SpawnTemplate>,
    /// Live entities.
    registry: Registry,
    /// Burst and periodic spawn timers.
    scheduler: SpawnScheduler,
    /// Player-steered drop anchor.
    dropper: SteeredMover,
    /// The active falling entity, if any.
    falling: Option<EntityId>,
    /// Pending highlight windows.
    dwells: Vec<DwellTimer>,
    /// Monotonic count of destroyed targets.
    destroyed_count: u32,
    /// Events accumulated during the current tick.
    events: Vec<Event>,
    /// Master seed, kept for lazy RNG construction after deserialization.
    seed: u64,
    /// Deterministic RNG, rebuilt from the seed when absent.
    #[serde(skip)]
    rng: Option<ChaCha8Rng>,
}

impl Simulation {
    /// Creates a simulation and performs activation: the initial burst is
    /// armed when configured, and periodic spawning starts when the
    /// configured interval is positive.
    #[must_use]
    pub fn new(config: ArenaConfig, templates: Vec<SpawnTemplate>, seed: u64) -> Self {
        if templates.is_empty() {
            warn!("simulation constructed without spawn templates; spawns will be skipped");
        }

        let mut scheduler = SpawnScheduler::new();
        if config.spawn_on_activate {
            scheduler.arm_burst(config.activate_spawn_count);
        }
        if config.auto_spawn_interval > 0.0 {
            scheduler.start_auto(config.auto_spawn_interval);
        }

        let dropper = SteeredMover::new(&config.dropper);

        Self {
            config,
            templates,
            registry: Registry::new(),
            scheduler,
            dropper,
            falling: None,
            dwells: Vec::new(),
            destroyed_count: 0,
            events: Vec::new(),
            seed,
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Advances the simulation by one tick and returns the events it
    /// produced, in the order they occurred.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<Event> {
        self.scheduler.advance(dt);

        // Burst attempts drain within the tick: a failed attempt moves
        // straight to the next one, a success waits out the spacing.
        while self.scheduler.take_burst_attempt() {
            if self.try_spawn() {
                self.scheduler
                    .note_burst_spawned(self.config.activate_spawn_spacing);
            }
        }
        if self.scheduler.take_auto_attempt() {
            self.try_spawn();
        }

        self.advance_rises(dt);

        self.dropper.tick(
            input.steer_axis,
            dt,
            &self.config.dropper,
            self.config.min_x,
            self.config.max_x,
        );

        self.advance_fall(dt);

        if input.drop {
            self.trigger_drop();
        }

        self.advance_dwells(dt);

        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    /// Attempts to spawn one placed entity right now.
    ///
    /// Returns false, after logging the reason, when the arena is at
    /// capacity, no templates are configured, or no free position was
    /// found. The placement solver is only consulted once the capacity
    /// check has passed.
    pub fn try_spawn(&mut self) -> bool {
        match self.attempt_spawn() {
            Ok(id) => {
                info!(%id, placed = self.registry.placed_count(), "spawned placed entity");
                true
            }
            Err(err @ SpawnError::NoTemplatesConfigured) => {
                warn!(%err, "spawn attempt skipped");
                false
            }
            Err(err) => {
                debug!(%err, "spawn attempt skipped");
                false
            }
        }
    }

    fn attempt_spawn(&mut self) -> Result<EntityId, SpawnError> {
        if self.registry.placed_count() >= self.config.max_placed {
            return Err(SpawnError::CapacityReached {
                cap: self.config.max_placed,
            });
        }
        if self.templates.is_empty() {
            return Err(SpawnError::NoTemplatesConfigured);
        }

        let template_count = self.templates.len();
        let index = self.rng_mut().gen_range(0..template_count);
        let template_id = TemplateId::new(index);
        let template = self.templates[index].clone();
        let width = template.footprint_width();

        let existing = self.registry.placed_footprints();
        let bounds = self.config.placement_bounds();
        let margin_ratio = self.config.margin_ratio;
        let gap_ratio = self.config.gap_ratio;
        let x = find_free_x(
            &existing,
            width,
            bounds,
            margin_ratio,
            gap_ratio,
            self.rng_mut(),
        )?;

        let position = Vec2::new(x, self.config.spawn_start_y);
        let mut components = PlacedComponents::new(
            template_id,
            position,
            width,
            template.height,
            template.target_y,
            template.asset.clone(),
        );
        components.start_rise(RiseAnimation::new(
            self.config.spawn_start_y,
            template.target_y,
            self.config.rise_duration,
            self.config.rise_curve,
        ));

        let id = self.registry.spawn(EntityInner::Placed(components));
        self.events.push(Event::Spawned {
            id,
            template: template_id,
            asset: template.asset,
            position,
            width,
        });
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Rise
    // -------------------------------------------------------------------------

    fn advance_rises(&mut self, dt: f32) {
        let mut completed = Vec::new();

        for entity in self.registry.entities_sorted_mut() {
            let id = entity.id();
            let Some(components) = entity.as_placed_mut() else {
                continue;
            };
            let Some(rise) = components.rise.as_mut() else {
                continue;
            };

            components.position.y = rise.advance(dt);
            if rise.is_complete() {
                components.rise = None;
                components.flags.remove(StatusFlags::RISING);
                completed.push(id);
            }
        }

        for id in completed {
            debug!(%id, "rise completed");
            self.events.push(Event::RiseCompleted { id });
        }
    }

    // -------------------------------------------------------------------------
    // Fall and collision
    // -------------------------------------------------------------------------

    /// Releases a falling entity from the dropper.
    ///
    /// Ignored while a fall is already active, so at most one falling
    /// entity exists at a time.
    pub fn trigger_drop(&mut self) {
        if self.falling.is_some() {
            debug!("drop ignored, a fall is already active");
            return;
        }

        let position = self.dropper.drop_point(&self.config.dropper);
        let components = FallingComponents::new(
            position,
            self.config.falling_width,
            self.config.falling_height,
            self.config.falling_asset.clone(),
        );
        let id = self.registry.spawn(EntityInner::Falling(components));
        self.falling = Some(id);
        info!(%id, x = position.x, "fall started");
        self.events.push(Event::FallStarted {
            id,
            asset: self.config.falling_asset.clone(),
            position,
        });
    }

    fn advance_fall(&mut self, dt: f32) {
        let Some(id) = self.falling else {
            return;
        };

        // Threshold removal happens on the tick after the crossing move, so
        // a collision on the crossing tick still counts.
        let below = self
            .registry
            .get(id)
            .map_or(true, |e| e.position().y <= self.config.destroy_y);
        if below {
            self.registry.despawn(id);
            self.falling = None;
            debug!(%id, "falling entity left the arena");
            self.events.push(Event::FallLost { id });
            return;
        }

        if let Some(components) = self.registry.get_mut(id).and_then(|e| e.as_falling_mut()) {
            components.position.y = fall_step(components.position.y, self.config.fall_speed, dt);
        }

        if let Some(target) = find_collision(&self.registry, id, &FootprintBounds) {
            self.resolve_collision(id, target);
        }
    }

    fn resolve_collision(&mut self, falling: EntityId, target: EntityId) {
        self.registry.despawn(falling);
        self.falling = None;
        info!(%falling, %target, "collision");
        self.events.push(Event::Collision { falling, target });

        let highlight = self.config.highlight_asset.clone();
        if let Some(components) = self.registry.get_mut(target).and_then(|e| e.as_placed_mut()) {
            components.stashed_asset =
                Some(std::mem::replace(&mut components.asset, highlight.clone()));
            components.flags.insert(StatusFlags::HIGHLIGHTED);
        }

        self.dwells.push(DwellTimer {
            target,
            remaining: self.config.highlight_duration,
        });
        self.events.push(Event::HighlightStarted {
            target,
            asset: highlight,
        });
    }

    // -------------------------------------------------------------------------
    // Dwell
    // -------------------------------------------------------------------------

    fn advance_dwells(&mut self, dt: f32) {
        let mut expired = Vec::new();
        for dwell in &mut self.dwells {
            dwell.remaining -= dt;
            if dwell.remaining <= 0.0 {
                expired.push(dwell.target);
            }
        }
        self.dwells.retain(|dwell| dwell.remaining > 0.0);

        for target in expired {
            let restored = self
                .registry
                .get_mut(target)
                .and_then(|e| e.as_placed_mut())
                .map(|components| {
                    let original = components
                        .stashed_asset
                        .take()
                        .unwrap_or_else(|| components.asset.clone());
                    components.asset = original.clone();
                    components.flags.remove(StatusFlags::HIGHLIGHTED);
                    original
                });

            self.registry.despawn(target);
            self.destroyed_count += 1;
            info!(%target, total = self.destroyed_count, "target destroyed");
            self.events.push(Event::TargetDestroyed {
                target,
                restored,
                destroyed_total: self.destroyed_count,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Control and accessors
    // -------------------------------------------------------------------------

    /// Starts (or restarts) periodic spawning with the configured interval.
    pub fn start_auto_spawn(&mut self) {
        self.scheduler.start_auto(self.config.auto_spawn_interval);
    }

    /// Stops periodic spawning. Idempotent; safe to call from teardown.
    pub fn stop_auto_spawn(&mut self) {
        self.scheduler.stop_auto();
    }

    /// Removes every entity, cancels the active fall and all pending
    /// dwells. The destroyed counter is kept.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.falling = None;
        self.dwells.clear();
        info!("arena cleared");
        self.events.push(Event::Cleared);
    }

    /// Returns the arena configuration.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Returns the configured templates.
    #[must_use]
    pub fn templates(&self) -> &[SpawnTemplate] {
        &self.templates
    }

    /// Returns a read-only view of the live entities.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the dropper anchor.
    #[must_use]
    pub const fn dropper(&self) -> &SteeredMover {
        &self.dropper
    }

    /// Returns the id of the active falling entity, if any.
    #[must_use]
    pub const fn falling(&self) -> Option<EntityId> {
        self.falling
    }

    /// Returns true while a fall is in flight.
    #[must_use]
    pub const fn is_falling(&self) -> bool {
        self.falling.is_some()
    }

    /// Returns the monotonic count of destroyed targets.
    #[must_use]
    pub const fn destroyed_count(&self) -> u32 {
        self.destroyed_count
    }

    /// Returns true while the periodic spawn trigger is running.
    #[must_use]
    pub fn auto_spawn_active(&self) -> bool {
        self.scheduler.auto_active()
    }

    /// Returns the master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds the placement diagnostic report for the current registry.
    #[must_use]
    pub fn placement_report(&self) -> String {
        self.registry.placement_report(
            self.config.placement_bounds(),
            self.config.max_placed,
            self.config.gap_ratio,
        )
    }

    /// Deterministic RNG, rebuilt from the master seed when the simulation
    /// was restored from a snapshot.
    fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        let seed = self.seed;
        self.rng
            .get_or_insert_with(|| ChaCha8Rng::seed_from_u64(seed))
    }
}

// =============================================================================
// Tests
// =============================================================================
