//! # Step Benchmark
//!
//! TARGET: a 250×250 surface stepped well inside one 60 ms tick.
//!
//! Run with: cargo bench --package ripple_core --bench step_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ripple_core::{Disturbance, DropRng, HeightField, SimulationSeed, StepScheduler, ARRIVAL_STREAM, PLACEMENT_STREAM};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("height_field_step");

    for dimension in [50, 150, 250] {
        let mut field = HeightField::new(dimension).unwrap();
        let mut rng = DropRng::new(SimulationSeed::new(42));
        for _ in 0..64 {
            field.inject_disturbance(&Disturbance::new(-3.0, 1.0, 1), &mut rng).unwrap();
        }

        group.throughput(Throughput::Elements((dimension * dimension) as u64));
        group.bench_with_input(BenchmarkId::new("step", dimension), &dimension, |b, _| {
            b.iter(|| {
                field.step();
                black_box(field.current_points());
            });
        });
    }

    group.finish();
}

fn bench_scheduler_tick(c: &mut Criterion) {
    let seed = SimulationSeed::new(48339);
    let mut field = HeightField::new(250).unwrap();
    let scheduler = StepScheduler::new(60.0, 35.0).unwrap();
    let splash = Disturbance::default();
    let mut placement = DropRng::new(seed.derive(PLACEMENT_STREAM));
    let mut arrivals = DropRng::new(seed.derive(ARRIVAL_STREAM));

    c.bench_function("scheduler_tick_250", |b| {
        b.iter(|| {
            black_box(
                scheduler
                    .tick(&mut field, black_box(&splash), &mut placement, &mut arrivals)
                    .unwrap(),
            )
        });
    });
}

fn bench_inject(c: &mut Criterion) {
    let mut field = HeightField::new(250).unwrap();
    let mut rng = DropRng::new(SimulationSeed::new(7));
    let splash = Disturbance::new(-3.0, 1.0, 4);

    c.bench_function("inject_disturbance_w4", |b| {
        b.iter(|| black_box(field.inject_disturbance(black_box(&splash), &mut rng).unwrap()));
    });
}

criterion_group!(benches, bench_step, bench_scheduler_tick, bench_inject);
criterion_main!(benches);
