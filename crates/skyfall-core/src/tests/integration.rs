//! End-to-end scenarios through the public tick API.

use glam::Vec2;

use super::helpers::{
    filled_simulation, init_tracing, quiet_config, quiet_simulation, run_until, DT,
};
use crate::config::ArenaConfig;
use crate::entity::{EntityId, StatusFlags};
use crate::events::Event;
use crate::simulation::{Simulation, TickInput};
use crate::template::{AssetId, SpawnTemplate};

fn single_template() -> Vec<SpawnTemplate> {
    vec![SpawnTemplate::new(AssetId::new("tower"))]
}

/// Steers the dropper until it rests within `tolerance` of `target_x`.
fn steer_to(sim: &mut Simulation, target_x: f32, tolerance: f32) {
    for _ in 0..7200 {
        let dx = target_x - sim.dropper().position().x;
        if dx.abs() <= tolerance && sim.dropper().velocity().abs() < 1.0 {
            return;
        }
        let input = TickInput {
            steer_axis: (dx / 50.0).clamp(-1.0, 1.0),
            drop: false,
        };
        sim.tick(&input, DT);
    }
    panic!("dropper did not reach x={target_x}");
}

/// Spawns one placed entity and ticks until it has settled; returns its id
/// and resting X.
fn settle_one_target(sim: &mut Simulation) -> (EntityId, f32) {
    assert!(sim.try_spawn());
    let id = sim.registry().entity_ids_sorted().next().unwrap();

    run_until(sim, 600, |_, events| {
        events
            .iter()
            .any(|e| matches!(e, Event::RiseCompleted { id: done } if *done == id))
    });

    let x = sim.registry().get(id).unwrap().position().x;
    (id, x)
}

mod placement_scenarios {
    use super::*;

    #[test]
    fn first_spawn_lands_in_the_margin_adjusted_range() {
        // Bounds [-500, 500], width 200, margin ratio 0.2: X in [-360, 360].
        init_tracing();
        let mut sim = Simulation::new(quiet_config(), single_template(), 7);

        for _ in 0..50 {
            assert!(sim.try_spawn());
            let x = sim
                .registry()
                .entities_sorted()
                .next()
                .unwrap()
                .position()
                .x;
            assert!(
                (-360.0..=360.0).contains(&x),
                "spawn at x={x} outside the margin-adjusted range"
            );
            sim.clear();
        }
    }

    #[test]
    fn capacity_rejection_consumes_no_randomness() {
        // A rejected attempt must happen before the template pick and the
        // placement solver, so an at-capacity try_spawn leaves the RNG
        // untouched: a twin that never made the failed attempt spawns the
        // identical entity afterwards.
        let mut sim = filled_simulation(42);
        let mut twin = sim.clone();

        assert!(!sim.try_spawn());

        sim.clear();
        twin.clear();
        assert!(sim.try_spawn());
        assert!(twin.try_spawn());

        let first = |s: &Simulation| {
            let entity = s.registry().entities_sorted().next().unwrap();
            (entity.position().x, entity.footprint_width())
        };
        assert_eq!(first(&sim), first(&twin));
    }

    #[test]
    fn footprints_stay_disjoint_through_periodic_spawning() {
        // Wide bounds so the fill can always succeed; the invariant under
        // test is disjointness, not placement luck.
        init_tracing();
        let config = ArenaConfig {
            min_x: -1000.0,
            max_x: 1000.0,
            ..ArenaConfig::default()
        };
        let mut sim = Simulation::new(config, single_template(), 42);

        for _ in 0..1200 {
            let events = sim.tick(&TickInput::default(), DT);
            if events.iter().any(|e| matches!(e, Event::Spawned { .. })) {
                assert!(
                    !sim.registry().has_overlaps(),
                    "overlap after placement:\n{}",
                    sim.placement_report()
                );
            }
        }

        assert_eq!(sim.registry().placed_count(), sim.config().max_placed);
    }

    #[test]
    fn burst_spawns_one_per_spacing_window() {
        init_tracing();
        let config = ArenaConfig {
            min_x: -2000.0,
            max_x: 2000.0,
            activate_spawn_count: 3,
            auto_spawn_interval: 0.0,
            ..ArenaConfig::default()
        };
        let mut sim = Simulation::new(config, single_template(), 42);

        let first_tick_spawns = sim
            .tick(&TickInput::default(), DT)
            .iter()
            .filter(|e| matches!(e, Event::Spawned { .. }))
            .count();
        assert_eq!(first_tick_spawns, 1, "burst must space successful spawns");

        let mut total = first_tick_spawns;
        for _ in 0..60 {
            total += sim
                .tick(&TickInput::default(), DT)
                .iter()
                .filter(|e| matches!(e, Event::Spawned { .. }))
                .count();
        }
        assert_eq!(total, 3);
    }
}

mod flight_scenarios {
    use super::*;

    #[test]
    fn steered_drop_hits_highlights_and_destroys() {
        let mut sim = quiet_simulation(42);
        let (target, target_x) = settle_one_target(&mut sim);
        let original_asset = sim
            .registry()
            .get(target)
            .unwrap()
            .as_placed()
            .unwrap()
            .asset
            .clone();

        // The dropper is clamped a little inside the arena edges; a target
        // hugging an edge is still well within horizontal hit range from
        // the clamp limit.
        steer_to(&mut sim, target_x.clamp(-340.0, 340.0), 10.0);
        sim.tick(
            &TickInput {
                steer_axis: 0.0,
                drop: true,
            },
            DT,
        );
        assert!(sim.is_falling());

        // The fall ends in a collision, not at the bottom of the arena.
        let mut collided = false;
        run_until(&mut sim, 10_000, |sim, events| {
            collided |= events.iter().any(
                |e| matches!(e, Event::Collision { target: t, .. } if *t == target),
            );
            !sim.is_falling()
        });
        assert!(collided, "fall missed a target directly underneath");

        // Dwell window: the target is highlighted and still present.
        let placed = sim.registry().get(target).unwrap().as_placed().unwrap();
        assert!(placed.flags.contains(StatusFlags::HIGHLIGHTED));
        assert_eq!(placed.asset, sim.config().highlight_asset);
        assert_eq!(sim.destroyed_count(), 0);

        // Dwell expiry: restored asset in the event, entity gone, count 1.
        let mut destroyed = None;
        run_until(&mut sim, 200, |_, events| {
            destroyed = events
                .iter()
                .find(|e| matches!(e, Event::TargetDestroyed { .. }))
                .cloned();
            destroyed.is_some()
        });

        match destroyed {
            Some(Event::TargetDestroyed {
                target: t,
                restored,
                destroyed_total,
            }) => {
                assert_eq!(t, target);
                assert_eq!(restored, Some(original_asset));
                assert_eq!(destroyed_total, 1);
            }
            other => panic!("expected TargetDestroyed, got {other:?}"),
        }

        assert!(sim.registry().get(target).is_none());
        assert!(sim.registry().is_empty());
        assert_eq!(sim.destroyed_count(), 1);
    }

    #[test]
    fn drop_away_from_the_target_misses_silently() {
        let mut sim = quiet_simulation(42);
        let (target, target_x) = settle_one_target(&mut sim);

        // Park the dropper on the far side of the arena from the target.
        let away_x = if target_x > 0.0 { -340.0 } else { 340.0 };
        steer_to(&mut sim, away_x, 10.0);
        sim.tick(
            &TickInput {
                steer_axis: 0.0,
                drop: true,
            },
            DT,
        );

        let mut lost = false;
        run_until(&mut sim, 10_000, |sim, events| {
            lost |= events.iter().any(|e| matches!(e, Event::FallLost { .. }));
            assert!(
                !events.iter().any(|e| matches!(e, Event::Collision { .. })),
                "fall must not collide on the far side"
            );
            !sim.is_falling()
        });

        assert!(lost);
        assert_eq!(sim.destroyed_count(), 0);
        assert!(sim.registry().get(target).is_some());
    }

    #[test]
    fn spawn_event_precedes_rise_completion() {
        let mut sim = quiet_simulation(42);

        assert!(sim.try_spawn());
        let spawned: Vec<Event> = sim.tick(&TickInput::default(), DT);
        assert!(
            !spawned
                .iter()
                .any(|e| matches!(e, Event::RiseCompleted { .. })),
            "rise cannot complete on its first tick"
        );

        run_until(&mut sim, 600, |_, events| {
            events
                .iter()
                .any(|e| matches!(e, Event::RiseCompleted { .. }))
        });
    }

    #[test]
    fn falling_entity_spawns_below_the_dropper() {
        let mut sim = quiet_simulation(42);

        let events = sim.tick(
            &TickInput {
                steer_axis: 0.0,
                drop: true,
            },
            DT,
        );

        let position = events
            .iter()
            .find_map(|e| match e {
                Event::FallStarted { position, .. } => Some(*position),
                _ => None,
            })
            .expect("drop must start a fall");

        let expected = Vec2::new(
            sim.dropper().position().x,
            sim.config().dropper.home_y - sim.config().dropper.drop_offset,
        );
        assert!((position.y - expected.y).abs() < 1e-3);
        assert!((position.x - expected.x).abs() < 1.0);
    }
}
