use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nof1_confidence::Bootstrap;
use nof1_core::ExecutionStrategy;
use rand::prelude::*;
use rand_distr::Normal;

/// Generate normal data
fn generate_normal_data(size: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..size).map(|_| normal.sample(&mut rng)).collect()
}

fn bench_mean_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("MeanDifferenceBootstrap");
    // Typical symptom logs: a few weeks to a few years of daily entries
    let sizes = [14, 90, 365, 1500];

    for &size in &sizes {
        let pre = generate_normal_data(size, 6.5, 1.5, 42);
        let post = generate_normal_data(size, 4.5, 1.5, 43);

        let sequential = Bootstrap::default().with_strategy(ExecutionStrategy::Sequential);
        group.bench_with_input(
            BenchmarkId::new("sequential", size),
            &(pre.clone(), post.clone()),
            |b, (pre, post)| b.iter(|| sequential.mean_difference(black_box(pre), black_box(post))),
        );

        let parallel = Bootstrap::default().with_strategy(ExecutionStrategy::Parallel);
        group.bench_with_input(
            BenchmarkId::new("parallel", size),
            &(pre, post),
            |b, (pre, post)| b.iter(|| parallel.mean_difference(black_box(pre), black_box(post))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mean_difference);
criterion_main!(benches);
