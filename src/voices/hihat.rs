//! Closed hi-hat voice.
//!
//! A tenth of a second of noise with everything below 8 kHz removed, leaving
//! the metallic sizzle.

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode, GraphNode,
};

pub const DURATION: f64 = 0.1;

pub const NOISE_SECONDS: f32 = 0.1;

pub fn hihat(noise: Vec<f32>) -> impl GraphNode {
    NoiseNode::new(noise)
        .through(FilterNode::highpass(8000.0))
        .amplify(EnvNode::decay(0.8, 0.01, 0.1))
}
