//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once constructed and focus on the
//! signal-processing math; graph nodes layer timing and composition on top.

/// Gain, envelope multiplication and bus summing.
pub mod amplify;
/// Exponential parameter ramps (amplitude, pitch, cutoff).
pub mod envelope;
/// State-variable filter with low/high-pass responses.
pub mod filter;
/// Oscillator waveforms and noise buffers.
pub mod oscillator;

pub use envelope::Curve;
pub use oscillator::Waveform;
