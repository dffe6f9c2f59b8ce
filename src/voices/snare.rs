//! Snare drum voice.
//!
//! White noise for the wire rattle layered over a short triangle tone for
//! the drum head.
//!
//! # How It Works
//!
//! 1. 0.2 s noise buffer, amplitude 1.0 → 0.01 over 0.2 s
//! 2. Triangle at 100 Hz, amplitude 0.7 → 0.01 over 0.1 s
//! 3. Both layers summed, stopped at 0.2 s

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, noise::NoiseNode, oscillator::OscNode, GraphNode,
};

pub const DURATION: f64 = 0.2;

/// Length of the rattle's noise buffer in seconds.
pub const NOISE_SECONDS: f32 = 0.2;

pub fn snare(noise: Vec<f32>) -> impl GraphNode {
    let rattle = NoiseNode::new(noise).amplify(EnvNode::decay(1.0, 0.01, 0.2));
    let body = OscNode::triangle(100.0).amplify(EnvNode::decay(0.7, 0.01, 0.1));

    rattle.mix(body)
}
