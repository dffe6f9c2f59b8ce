//! Benchmarks for every recipe in the sound bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drumgrid::{graph::node::RenderCtx, Instrument};
use rand::{rngs::SmallRng, SeedableRng};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let mut rng = SmallRng::seed_from_u64(1);

    // Mid-envelope, where every curve is still moving
    let ctx = RenderCtx::new(SAMPLE_RATE, 0.05);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for instrument in Instrument::ALL {
            let mut node = instrument.build(&mut rng, SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(instrument.as_str(), size), &size, |b, _| {
                b.iter(|| {
                    node.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Building is on the control thread, but noise recipes allocate
        group.bench_with_input(BenchmarkId::new("build_hihat", size), &size, |b, _| {
            b.iter(|| black_box(Instrument::Hihat.build(&mut rng, SAMPLE_RATE)))
        });
    }

    group.finish();
}
