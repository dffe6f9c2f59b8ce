//! Bass voice.
//!
//! Sawtooth at 80 Hz through a low-pass whose cutoff closes from 1000 Hz to
//! 500 Hz, so the note starts bright and darkens as it decays.
//!
//! # How It Works
//!
//! 1. Sawtooth oscillator, fixed 80 Hz
//! 2. Low-pass cutoff 1000 → 500 Hz exponential over 0.2 s
//! 3. Amplitude 0.9 → 0.01 over 0.4 s, stopped at 0.4 s

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

pub const DURATION: f64 = 0.4;

pub fn bass() -> impl GraphNode {
    OscNode::sawtooth(80.0)
        .through(FilterNode::lowpass(1000.0).sweep_to(500.0, 0.2))
        .amplify(EnvNode::decay(0.9, 0.01, 0.4))
}
