use crate::dsp::{
    envelope::Curve,
    oscillator::{OscillatorBlock, Waveform},
};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Oscillator Node
===============

A periodic source whose frequency follows a Curve in voice-local time.

  Constant pitch:  OscNode::square(440.0)                       lead
  Pitch sweep:     OscNode::sine(150.0).sweep_to(0.01, 0.3)     kick

The sweep is what turns a sine into a kick: the first few milliseconds at
150 Hz give the click, the plunge toward sub-audio gives the body.

Example usage:
  // Percussion: triangle falling a fifth in 100 ms
  let perc = OscNode::triangle(300.0).sweep_to(200.0, 0.1);
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: Curve,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency: Curve::constant(frequency),
        }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(Waveform::Sine, frequency)
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(Waveform::Square, frequency)
    }

    pub fn sawtooth(frequency: f32) -> Self {
        Self::new(Waveform::Sawtooth, frequency)
    }

    pub fn triangle(frequency: f32) -> Self {
        Self::new(Waveform::Triangle, frequency)
    }

    /// Sweep exponentially from the current start frequency to `target`
    /// over `duration` seconds.
    pub fn sweep_to(mut self, target: f32, duration: f32) -> Self {
        let from = self.frequency.value_at(0.0);
        self.frequency = Curve::exponential(from, target, duration);
        self
    }

    pub fn frequency(&self) -> &Curve {
        &self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match self.frequency {
            Curve::Constant(freq) => {
                for sample in out.iter_mut() {
                    *sample = self.osc.next_sample(freq, ctx.sample_rate);
                }
            }
            curve => {
                for (i, sample) in out.iter_mut().enumerate() {
                    let freq = curve.value_at(ctx.time_at(i));
                    *sample = self.osc.next_sample(freq, ctx.sample_rate);
                }
            }
        }
    }
}
