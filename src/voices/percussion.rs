//! Tuned percussion voice.
//!
//! A triangle that drops a fifth (300 → 200 Hz) in 100 ms, like a small tom
//! or wood block.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const DURATION: f64 = 0.2;

pub fn percussion() -> impl GraphNode {
    OscNode::triangle(300.0)
        .sweep_to(200.0, 0.1)
        .amplify(EnvNode::decay(0.7, 0.01, 0.2))
}
