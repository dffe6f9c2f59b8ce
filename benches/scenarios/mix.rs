//! Full pattern through the master bus.
//!
//! Every track fires on every step, so the graph carries the worst-case
//! number of overlapping voices.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use drumgrid::{
    graph::{AnalysisTap, GraphMessage, SignalGraph, Voice},
    host::SampleClock,
    Instrument,
};
use rand::{rngs::SmallRng, SeedableRng};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// One bar at 120 BPM, all eight tracks on every step.
fn dense_bar(rng: &mut SmallRng) -> VecDeque<GraphMessage> {
    let mut queue = VecDeque::new();
    for step in 0..16 {
        let start = step as f64 * 0.125;
        for instrument in Instrument::ALL {
            let node = instrument.build(rng, SAMPLE_RATE);
            let voice = Voice::new(instrument, start, instrument.duration(), 1.0, node);
            queue.push_back(GraphMessage::Play(voice));
        }
    }
    queue
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let mut rng = SmallRng::seed_from_u64(1);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("dense_bar", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let clock = SampleClock::new(SAMPLE_RATE);
                    // Jump into the second step so several voices overlap
                    clock.advance((0.2 * SAMPLE_RATE) as usize);
                    SignalGraph::new(dense_bar(&mut rng), AnalysisTap::default(), clock)
                },
                |mut graph| {
                    graph.render(black_box(&mut buffer));
                    graph
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}
