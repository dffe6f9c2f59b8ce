use crate::{
    graph::node::{GraphNode, RenderCtx},
    voices::Instrument,
};

/// One triggered sound: a private node chain plus its place on the timeline.
///
/// Built on the control thread, moved to the audio thread, dropped once its
/// stop time passes. Voices never share nodes.
pub struct Voice {
    pub instrument: Instrument,
    /// Absolute audio-clock time of the first sample, in seconds.
    pub start: f64,
    /// Seconds after `start` at which every source has stopped.
    pub duration: f64,
    /// Track volume captured when the voice was triggered.
    pub gain: f32,
    node: Box<dyn GraphNode>,
    /// Voice-local seconds already rendered.
    elapsed: f64,
}

impl Voice {
    pub fn new(
        instrument: Instrument,
        start: f64,
        duration: f64,
        gain: f32,
        node: Box<dyn GraphNode>,
    ) -> Self {
        Self {
            instrument,
            start,
            duration,
            gain,
            node,
            elapsed: 0.0,
        }
    }

    /// Render `out.len()` samples of the voice, continuing from where the
    /// previous call left off. Samples past the stop time are silent.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32) {
        let ctx = RenderCtx::new(sample_rate, self.elapsed);
        self.node.render_block(out, &ctx);

        let remaining = ((self.duration - self.elapsed) * sample_rate as f64).ceil();
        let audible = if remaining <= 0.0 {
            0
        } else {
            (remaining as usize).min(out.len())
        };
        out[audible..].fill(0.0);

        for sample in &mut out[..audible] {
            *sample *= self.gain;
        }

        self.elapsed = ctx.time_at(out.len());
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
