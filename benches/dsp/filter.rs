//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::graph::{filter::FilterNode, node::RenderCtx, GraphNode};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::new(SAMPLE_RATE, 0.0);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| ((i % 32) as f32 / 16.0) - 1.0).collect();
        let mut buffer = input.clone();

        // Fixed cutoff - one tan() per block
        let mut highpass = FilterNode::highpass(8000.0);
        group.bench_with_input(BenchmarkId::new("highpass_fixed", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                highpass.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Swept cutoff - coefficient update per sample
        let mut lowpass = FilterNode::lowpass(1000.0).sweep_to(500.0, 0.2);
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
