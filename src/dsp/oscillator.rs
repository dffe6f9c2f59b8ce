use std::f32::consts::TAU;

use rand::{rngs::SmallRng, Rng};
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillators
=============================

Every periodic source in the drum machine is one phase accumulator:

    phase ∈ [0, 1)          position inside the current cycle
    phase += f / sr         advance once per sample
    phase -= 1.0            wrap when a cycle completes

The waveform is a pure function of phase. Because the frequency is read per
sample, a frequency that sweeps (kick, percussion, effect) keeps a continuous
phase and never clicks.

  Sine      sin(2π·phase)                       pure tone, kick/chord/effect
  Square    +1 for the first half, -1 after      hollow, lead
  Sawtooth  2·phase - 1                         bright, bass
  Triangle  rises 0 → 1 → -1 → 0                soft, snare body/percussion

Waveforms start at zero crossing (sine, triangle) so a voice that begins at
an exact sample does not pop.

Noise
-----
Snare and hi-hat use a one-shot buffer of uniform white noise in [-1, 1),
generated at trigger time. The generator is a seeded SmallRng, so a given
seed always produces the same hit.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Evaluate the waveform at a phase in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    /// Emit one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase = self.phase.fract();
        }
        out
    }
}

/// Fill a fresh buffer of `seconds` of white noise.
pub fn noise_buffer(rng: &mut SmallRng, seconds: f32, sample_rate: f32) -> Vec<f32> {
    let len = (seconds * sample_rate).round().max(0.0) as usize;
    (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}
