use crate::dsp::{envelope::Curve, filter::SVFilter};
use crate::graph::node::{GraphNode, RenderCtx};

/// In-place filter stage whose cutoff follows a Curve.
///
/// Used with `.through()`:
///   OscNode::sawtooth(80.0).through(FilterNode::lowpass(1000.0).sweep_to(500.0, 0.2))
pub struct FilterNode {
    filter: SVFilter,
    cutoff: Curve,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
            cutoff: Curve::constant(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
            cutoff: Curve::constant(cutoff_hz),
        }
    }

    /// Sweep the cutoff exponentially to `target` over `duration` seconds.
    pub fn sweep_to(mut self, target: f32, duration: f32) -> Self {
        let from = self.cutoff.value_at(0.0);
        self.cutoff = Curve::exponential(from, target, duration);
        self
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match self.cutoff {
            Curve::Constant(_) => self.filter.render(out, ctx.sample_rate),
            curve => {
                for (i, sample) in out.iter_mut().enumerate() {
                    self.filter.set_cutoff(curve.value_at(ctx.time_at(i)));
                    *sample = self.filter.process(*sample, ctx.sample_rate);
                }
            }
        }
    }
}
