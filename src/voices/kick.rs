//! Kick drum voice.
//!
//! A sine whose pitch plunges from 150 Hz toward sub-audio while the level
//! decays. The first few milliseconds at 150 Hz give the click, the rest of
//! the sweep gives the body.
//!
//! # How It Works
//!
//! 1. Sine oscillator, 150 Hz → 0.01 Hz exponential over 0.3 s
//! 2. Amplitude 1.0 → 0.001 exponential over 0.3 s
//! 3. Stops at 0.3 s

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const DURATION: f64 = 0.3;

pub fn kick() -> impl GraphNode {
    OscNode::sine(150.0)
        .sweep_to(0.01, 0.3)
        .amplify(EnvNode::decay(1.0, 0.001, 0.3))
}
