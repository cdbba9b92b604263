//! Objective and single-point quotient benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use diffquot_bench::{SIZES, scaled_buffer};
use diffquot_core::{SummationOrder, forward_difference_error, sum_of_squares, sum_of_squares_ordered};

fn bench_sum_of_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_of_squares");
    let single = scaled_buffer::<f32>(*SIZES.last().unwrap_or(&0), 100.0);
    let double = scaled_buffer::<f64>(*SIZES.last().unwrap_or(&0), 100.0);

    for &n in SIZES {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("f32", n), &n, |b, &n| {
            let x = &single.as_slice()[..n];
            b.iter(|| black_box(sum_of_squares(black_box(x))));
        });
        group.bench_with_input(BenchmarkId::new("f64", n), &n, |b, &n| {
            let x = &double.as_slice()[..n];
            b.iter(|| black_box(sum_of_squares(black_box(x))));
        });
        group.bench_with_input(BenchmarkId::new("f64_reverse", n), &n, |b, &n| {
            let x = &double.as_slice()[..n];
            b.iter(|| black_box(sum_of_squares_ordered(black_box(x), SummationOrder::Reverse)));
        });
    }
    group.finish();
}

fn bench_forward_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_difference_error");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::new("f64", n), &n, |b, &n| {
            let mut x: Vec<f64> = scaled_buffer::<f64>(n, 100.0).as_slice().to_vec();
            b.iter(|| {
                black_box(forward_difference_error(
                    &mut x,
                    black_box(1e-6),
                    100.0,
                    SummationOrder::Forward,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sum_of_squares, bench_forward_difference);
criterion_main!(benches);
