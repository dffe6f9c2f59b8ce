//! Gain and summing primitives used by the mixer.

/*
Gain Staging
============

  gain = 1.0  →  unchanged (unity)
  gain = 0.5  →  -6 dB
  gain = 0.0  →  silence

Every stage in the mixer is one of two operations:

    scale:       out[i] *= gain                (track volume, master volume)
    accumulate:  bus[i] += source[i] × gain    (voice into the master bus)

Summing many voices can exceed ±1.0. Nothing here clips; the output stage
decides what to do with overs.
*/

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a modulator, writing result into signal buffer (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

/// Add `source × gain` into `bus`.
#[inline]
pub fn accumulate(bus: &mut [f32], source: &[f32], gain: f32) {
    debug_assert_eq!(bus.len(), source.len());

    for (b, &s) in bus.iter_mut().zip(source.iter()) {
        *b += s * gain;
    }
}
