//! Benchmarks for gain and envelope multiplication.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::dsp::amplify::{apply_gain, multiply_in_place};

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.5f32; size];
        let modulator = vec![0.8f32; size];

        group.bench_with_input(BenchmarkId::new("apply_gain", size), &size, |b, _| {
            b.iter(|| apply_gain(black_box(&mut buffer), black_box(0.999)))
        });

        group.bench_with_input(BenchmarkId::new("multiply_in_place", size), &size, |b, _| {
            b.iter(|| multiply_in_place(black_box(&mut buffer), black_box(&modulator)))
        });
    }

    group.finish();
}
