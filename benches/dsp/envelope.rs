//! Benchmarks for exponential envelope rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::graph::{envelope::EnvNode, node::RenderCtx, GraphNode};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Mid-ramp: powf per sample
        let decaying = RenderCtx::new(SAMPLE_RATE, 0.1);
        let mut env = EnvNode::decay(1.0, 0.001, 0.3);
        group.bench_with_input(BenchmarkId::new("decaying", size), &size, |b, _| {
            b.iter(|| {
                env.render_block(black_box(&mut buffer), black_box(&decaying));
            })
        });

        // Settled: constant floor
        let settled = RenderCtx::new(SAMPLE_RATE, 1.0);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                env.render_block(black_box(&mut buffer), black_box(&settled));
            })
        });
    }

    group.finish();
}
