use crate::graph::node::{GraphNode, RenderCtx};

/// One-shot playback of a pre-generated noise buffer.
///
/// Plays the buffer once from the start, then outputs silence.
pub struct NoiseNode {
    buffer: Vec<f32>,
    position: usize,
}

impl NoiseNode {
    pub fn new(buffer: Vec<f32>) -> Self {
        Self { buffer, position: 0 }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let remaining = &self.buffer[self.position.min(self.buffer.len())..];
        let n = remaining.len().min(out.len());
        out[..n].copy_from_slice(&remaining[..n]);
        out[n..].fill(0.0);
        self.position += n;
    }
}
