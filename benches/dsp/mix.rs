//! Benchmarks for summing layered sources.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::graph::{extensions::NodeExt, node::RenderCtx, oscillator::OscNode, GraphNode};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");
    let ctx = RenderCtx::new(SAMPLE_RATE, 0.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut pair = OscNode::sine(261.63).mix(OscNode::sine(329.63));
        group.bench_with_input(BenchmarkId::new("two_sines", size), &size, |b, _| {
            b.iter(|| {
                pair.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        let mut triad = OscNode::sine(261.63)
            .mix(OscNode::sine(329.63))
            .mix(OscNode::sine(392.0));
        group.bench_with_input(BenchmarkId::new("three_sines", size), &size, |b, _| {
            b.iter(|| {
                triad.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
