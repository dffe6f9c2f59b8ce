//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::graph::{node::RenderCtx, oscillator::OscNode, GraphNode};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::new(SAMPLE_RATE, 0.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = OscNode::sine(440.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Square - branch per sample
        let mut osc = OscNode::square(440.0);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                osc.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Swept sine - powf per sample for the frequency curve
        let mut osc = OscNode::sine(150.0).sweep_to(0.01, 0.3);
        group.bench_with_input(BenchmarkId::new("sine_swept", size), &size, |b, _| {
            b.iter(|| {
                osc.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
