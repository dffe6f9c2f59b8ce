use crate::dsp::envelope::Curve;
use crate::graph::node::{GraphNode, RenderCtx};

/// Amplitude envelope: instant set at the trigger, exponential decay to a floor.
///
/// Renders control values, so it is normally used as the modulator of
/// `.amplify()`.
pub struct EnvNode {
    curve: Curve,
}

impl EnvNode {
    /// Start at `peak`, decay exponentially to `floor` over `duration` seconds.
    pub fn decay(peak: f32, floor: f32, duration: f32) -> Self {
        Self {
            curve: Curve::exponential(peak, floor, duration),
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.curve.render(out, ctx.time, ctx.sample_rate);
    }
}
