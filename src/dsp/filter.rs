use std::f32::consts::PI;

/*
| type      | passes       | rejects      | used by |
| --------- | ------------ | ------------ | ------- |
| low-pass  | below cutoff | above cutoff | bass    |
| high-pass | above cutoff | below cutoff | hi-hat  |

Topology-preserving state-variable filter (trapezoidal integrators). The
cutoff may change every sample without zipper noise, which the bass voice
relies on for its 1000 → 500 Hz sweep.

Damping: k = 1/Q. The default Q of 1.0 matches a browser biquad's default.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: 1.0,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    #[inline]
    fn coefficient(&self, sample_rate: f32) -> f32 {
        // Keep the prewarped cutoff below Nyquist so tan() stays finite.
        let cutoff = self.cutoff_hz.clamp(1.0, sample_rate * 0.49);
        (PI * cutoff / sample_rate).tan()
    }

    /// Filter one sample in place using the current cutoff.
    #[inline]
    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        let g = self.coefficient(sample_rate);
        let k = 1.0 / self.q.max(0.01);

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.filter_type {
            FilterType::LowPass => v2,
            FilterType::HighPass => sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, sample_rate);
        }
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }
}
