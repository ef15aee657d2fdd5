//! Benchmarks for the Box-Cox search and the full report.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sensor_analytics::config::AnalysisConfig;
use sensor_analytics::core::Series;
use sensor_analytics::report::analyze;
use sensor_analytics::seasonality::decompose;
use sensor_analytics::transform::boxcox_lambda;
use sensor_analytics::validation::qq_plot;

const SIZES: [usize; 6] = [128, 256, 512, 1024, 2048, 4096];

/// Right-skewed readings with a daily cycle, like PM2.5 sampled hourly.
fn generate_readings(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let cycle = 4.0 * (2.0 * std::f64::consts::PI * i as f64 / 24.0).sin();
            let noise: f64 = rng.gen_range(-1.0..1.0);
            (2.5 + 0.1 * cycle + 0.4 * noise).exp()
        })
        .collect()
}

fn bench_boxcox(c: &mut Criterion) {
    let mut group = c.benchmark_group("boxcox_lambda");

    for size in SIZES.iter() {
        let data = generate_readings(*size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| boxcox_lambda(black_box(&data)))
        });
    }

    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    for size in SIZES.iter() {
        let data = generate_readings(*size, 7);

        group.bench_with_input(BenchmarkId::new("qq_plot", size), size, |b, _| {
            b.iter(|| qq_plot(black_box(&data)))
        });

        group.bench_with_input(BenchmarkId::new("decompose", size), size, |b, _| {
            b.iter(|| decompose(black_box(&data), 24))
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let config = AnalysisConfig::default().with_seasonal_period(24);

    for size in SIZES.iter() {
        let series = Series::from_values(generate_readings(*size, 1234)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| analyze(black_box(&series), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_boxcox, bench_components, bench_report);
criterion_main!(benches);
