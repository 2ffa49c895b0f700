use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use emberwood_ecs::{Registry, SparseSet};

// ---------------------------------------------------------------------------
// Helper component types
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Clone, Copy)]
struct Velocity {
    x: f32,
}

#[derive(Clone, Copy)]
struct Health(f32);

const N: usize = 1_000;

fn world_with_positions() -> Registry {
    let mut registry = Registry::with_capacity(N);
    for i in 0..N {
        let e = registry.create_entity();
        registry.add_component(
            e,
            Position {
                x: i as f32,
                y: 0.0,
                z: 0.0,
            },
        );
    }
    registry
}

// ---------------------------------------------------------------------------
// Entity lifecycle
// ---------------------------------------------------------------------------

fn bench_create_entities(c: &mut Criterion) {
    c.bench_function("create_1k_entities", |b| {
        b.iter_batched(
            || Registry::with_capacity(N),
            |mut registry| {
                for _ in 0..N {
                    black_box(registry.create_entity());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_create_destroy_recycling(c: &mut Criterion) {
    c.bench_function("create_destroy_recycle_1k", |b| {
        b.iter_batched(
            || {
                let mut registry = Registry::with_capacity(N);
                let mut entities: Vec<_> = (0..N).map(|_| registry.create_entity()).collect();
                for e in &mut entities {
                    registry.destroy_entity(e);
                }
                registry
            },
            |mut registry| {
                // Re-creating reuses recycled slots
                for _ in 0..N {
                    black_box(registry.create_entity());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

// ---------------------------------------------------------------------------
// Component add / remove
// ---------------------------------------------------------------------------

fn bench_add_component(c: &mut Criterion) {
    c.bench_function("add_component_1k", |b| {
        b.iter_batched(
            || {
                let mut registry = Registry::with_capacity(N);
                let entities: Vec<_> = (0..N).map(|_| registry.create_entity()).collect();
                (registry, entities)
            },
            |(mut registry, entities)| {
                for (i, e) in entities.iter().enumerate() {
                    registry.add_component(
                        *e,
                        Position {
                            x: i as f32,
                            y: 0.0,
                            z: 0.0,
                        },
                    );
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_remove_component(c: &mut Criterion) {
    c.bench_function("remove_component_1k", |b| {
        b.iter_batched(
            || {
                let mut registry = Registry::with_capacity(N);
                let entities: Vec<_> = (0..N).map(|_| registry.create_entity()).collect();
                for e in &entities {
                    registry.add_component(*e, Health(100.0));
                }
                (registry, entities)
            },
            |(mut registry, entities)| {
                for e in &entities {
                    black_box(registry.remove_component::<Health>(*e));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

fn bench_single_view_iteration(c: &mut Criterion) {
    let registry = world_with_positions();
    c.bench_function("view_iterate_1k_single", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for entity in registry.view::<(Position,)>() {
                sum += registry.get_component::<Position>(entity).x;
            }
            black_box(sum)
        });
    });
}

fn bench_intersection_view_iteration(c: &mut Criterion) {
    // Position on everyone, Velocity on every tenth entity: the Velocity
    // pool drives the scan.
    let mut registry = Registry::with_capacity(N);
    for i in 0..N {
        let e = registry.create_entity();
        registry.add_component(
            e,
            Position {
                x: i as f32,
                y: 0.0,
                z: 0.0,
            },
        );
        if i % 10 == 0 {
            registry.add_component(e, Velocity { x: 1.0 });
        }
    }

    c.bench_function("view_iterate_1k_intersection", |b| {
        b.iter(|| {
            let mut count = 0u32;
            for entity in registry.view::<(Position, Velocity)>() {
                black_box(registry.get_component::<Velocity>(entity).x);
                count += 1;
            }
            black_box(count)
        });
    });
}

// ---------------------------------------------------------------------------
// Sparse set primitives
// ---------------------------------------------------------------------------

fn bench_sparse_set_insert_remove(c: &mut Criterion) {
    c.bench_function("sparse_set_insert_remove_1k", |b| {
        b.iter_batched(
            || SparseSet::new(N, N as u32 - 1),
            |mut set| {
                for v in 0..N as u32 {
                    set.insert(v);
                }
                for v in (0..N as u32).rev() {
                    set.remove(v);
                }
                black_box(set.len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_create_entities,
    bench_create_destroy_recycling,
    bench_add_component,
    bench_remove_component,
    bench_single_view_iteration,
    bench_intersection_view_iteration,
    bench_sparse_set_insert_remove,
);
criterion_main!(benches);
