use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyfall_core::placement::{find_free_x, Footprint, PlacementBounds};
use skyfall_core::template::{AssetId, SpawnTemplate};
use skyfall_core::{ArenaConfig, Simulation, TickInput};

fn bench_find_free_x_empty(c: &mut Criterion) {
    let bounds = PlacementBounds::new(-500.0, 500.0);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("find_free_x_empty", |b| {
        b.iter(|| find_free_x(black_box(&[]), 200.0, bounds, 0.2, 0.1, &mut rng))
    });
}

fn bench_find_free_x_near_capacity(c: &mut Criterion) {
    // Two entities already placed: the common case right before the arena
    // fills up, where most candidates get rejected.
    let bounds = PlacementBounds::new(-500.0, 500.0);
    let existing = vec![Footprint::new(-200.0, 200.0), Footprint::new(150.0, 200.0)];
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("find_free_x_near_capacity", |b| {
        b.iter(|| find_free_x(black_box(&existing), 200.0, bounds, 0.2, 0.1, &mut rng))
    });
}

fn bench_find_free_x_saturated(c: &mut Criterion) {
    // No free slot left: every call burns the full attempt budget.
    let bounds = PlacementBounds::new(-500.0, 500.0);
    let existing = vec![
        Footprint::new(-300.0, 200.0),
        Footprint::new(0.0, 200.0),
        Footprint::new(300.0, 200.0),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("find_free_x_saturated", |b| {
        b.iter(|| find_free_x(black_box(&existing), 200.0, bounds, 0.2, 0.1, &mut rng))
    });
}

fn bench_full_tick(c: &mut Criterion) {
    let templates = vec![
        SpawnTemplate::new(AssetId::new("tower_red")),
        SpawnTemplate::new(AssetId::new("tower_blue")).with_width(240.0),
    ];
    let mut sim = Simulation::new(ArenaConfig::default(), templates, 42);
    let input = TickInput {
        steer_axis: 0.5,
        drop: false,
    };

    c.bench_function("full_tick", |b| {
        b.iter(|| {
            let events = sim.tick(black_box(&input), 1.0 / 60.0);
            black_box(events)
        })
    });
}

criterion_group!(
    benches,
    bench_find_free_x_empty,
    bench_find_free_x_near_capacity,
    bench_find_free_x_saturated,
    bench_full_tick
);
criterion_main!(benches);
