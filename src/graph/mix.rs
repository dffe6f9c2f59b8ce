use crate::{
    dsp::amplify::accumulate,
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Summing
================

Mix renders two sources and adds them at unity gain:

    output = A + B

This is how several envelope-shaped layers feed the same track gain: the
snare's noise and triangle body, or the three sines of the chord. Each layer
carries its own envelope, so levels are set before summing, not here.

  [A] ────┬──→ (+) ──→ output
  [B] ────┘

Summing can exceed ±1.0 when layers peak together; the chord keeps each
voice at 0.2 so three layers stay well inside range.
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B) -> Self {
        Mix {
            source_a,
            source_b,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let temp = &mut self.temp_buffer[..out.len()];
        self.source_b.render_block(temp, ctx);

        accumulate(out, temp, 1.0);
    }
}
