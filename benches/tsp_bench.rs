//! Criterion benchmarks for the tour GA.
//!
//! Uses synthetic instances (points on a circle) so the optimum is known
//! and timings do not depend on input files.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tsp_ga::ga::test_support::circle_model;
use tsp_ga::ga::{Crossover, GaConfig, GaRunner, Individual, InitialTour};
use tsp_ga::random::create_rng;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_circle");
    group.sample_size(10);

    for &(n, pop, gen) in &[(20u32, 50usize, 50usize), (50, 100, 50), (100, 100, 50)] {
        let model = circle_model(n);
        let config = GaConfig::new(pop, gen, 0.2, 0.5).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &(model, config),
            |b, (m, c)| {
                b.iter(|| {
                    let runner = GaRunner::new(c.clone(), m).unwrap();
                    black_box(runner.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_initial_tour(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_tour");

    let model = circle_model(200);
    for (name, strategy) in [
        ("random", InitialTour::Random),
        ("grasp_rcl3", InitialTour::GreedyRandomized { rcl_size: 3 }),
    ] {
        group.bench_function(name, |b| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let tour = Individual::from_strategy(1, 200, 1, &strategy, &model, &mut rng);
                black_box(tour.unwrap())
            })
        });
    }
    group.finish();
}

fn bench_pmx(c: &mut Criterion) {
    let mut group = c.benchmark_group("pmx");

    for &n in &[50u32, 200, 1000] {
        let mut rng = create_rng(42);
        let p1 = Individual::random(1, n, 1, &mut rng).unwrap();
        let p2 = Individual::random(1, n, 1, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(p1, p2), |b, (p1, p2)| {
            let mut rng = create_rng(7);
            b.iter(|| {
                let child = Crossover::PartiallyMapped.perform(p1, p2, None, &mut rng);
                black_box(child.unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_circle, bench_initial_tour, bench_pmx);
criterion_main!(benches);
