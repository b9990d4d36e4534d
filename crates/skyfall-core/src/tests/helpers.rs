//! Test helper functions for setting up simulations.

use std::sync::Once;

use crate::config::ArenaConfig;
use crate::simulation::{Simulation, TickInput};
use crate::template::{AssetId, SpawnTemplate};

/// Reference frame time used across the test suite.
pub const DT: f32 = 1.0 / 60.0;

static TRACING: Once = Once::new();

/// Installs a test tracing subscriber once per process.
///
/// Safe to call from every test; later calls are no-ops, and a subscriber
/// installed elsewhere is left in place.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A config with both automatic spawn triggers disabled, so tests drive
/// every spawn explicitly.
#[must_use]
pub fn quiet_config() -> ArenaConfig {
    ArenaConfig {
        spawn_on_activate: false,
        auto_spawn_interval: 0.0,
        ..ArenaConfig::default()
    }
}

/// The standard two-template list used across tests.
#[must_use]
pub fn test_templates() -> Vec<SpawnTemplate> {
    vec![
        SpawnTemplate::new(AssetId::new("tower_red")),
        SpawnTemplate::new(AssetId::new("tower_blue")).with_width(240.0),
    ]
}

/// A quiet simulation with the standard templates.
#[must_use]
pub fn quiet_simulation(seed: u64) -> Simulation {
    init_tracing();
    Simulation::new(quiet_config(), test_templates(), seed)
}

/// A quiet simulation on a wide arena, filled to the placed-entity
/// capacity.
///
/// The wide bounds keep the fill from ever being geometrically blocked;
/// individual attempts may still exhaust their budget, so the fill retries
/// the way the periodic trigger would.
#[must_use]
pub fn filled_simulation(seed: u64) -> Simulation {
    init_tracing();
    let config = ArenaConfig {
        min_x: -1000.0,
        max_x: 1000.0,
        ..quiet_config()
    };
    let mut sim = Simulation::new(config, test_templates(), seed);
    for _ in 0..100 {
        if sim.registry().placed_count() >= sim.config().max_placed {
            return sim;
        }
        sim.try_spawn();
    }
    panic!("could not fill arena to capacity");
}

/// Ticks `sim` with idle input until `predicate` holds, panicking after
/// `max_ticks`.
pub fn run_until(
    sim: &mut Simulation,
    max_ticks: usize,
    mut predicate: impl FnMut(&Simulation, &[crate::events::Event]) -> bool,
) {
    for _ in 0..max_ticks {
        let events = sim.tick(&TickInput::default(), DT);
        if predicate(sim, &events) {
            return;
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}
