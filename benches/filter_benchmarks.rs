//! Benchmarks for filter performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use blink_morse::filters::{
    exponential::ExponentialFilter, median::MedianFilter, moving_average::MovingAverageFilter,
    NoFilter, SignalFilter,
};

/// Openness trace with landmark jitter, deterministic
fn openness_trace(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.05;
            0.3 + 0.01 * (t * 7.0).sin() + 0.005 * (t * 31.0).cos()
        })
        .collect()
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let test_data = openness_trace(100);

    let filter_configs = vec![
        ("no_filter", Box::new(NoFilter) as Box<dyn SignalFilter>),
        ("moving_average_5", Box::new(MovingAverageFilter::new(5))),
        ("moving_average_10", Box::new(MovingAverageFilter::new(10))),
        ("median_5", Box::new(MedianFilter::new(5))),
        ("median_9", Box::new(MedianFilter::new(9))),
        ("exponential_0.5", Box::new(ExponentialFilter::new(0.5))),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_with_input(BenchmarkId::new("single_update", name), &test_data[0], |b, &value| {
            b.iter(|| black_box(filter.apply(black_box(value))));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &test_data, |b, data| {
            b.iter(|| {
                filter.reset();
                for &value in data {
                    black_box(filter.apply(black_box(value)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_median_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("median_sorting");
    let test_data = openness_trace(21);

    for window_size in [5, 9, 15, 21] {
        let mut median = MedianFilter::new(window_size);

        group.bench_with_input(BenchmarkId::new("window_size", window_size), &window_size, |b, &n| {
            b.iter(|| {
                median.reset();
                for &value in &test_data[..n] {
                    black_box(median.apply(black_box(value)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filters, benchmark_median_sorting);
criterion_main!(benches);
