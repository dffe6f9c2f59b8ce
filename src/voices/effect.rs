//! Effect voice: a falling sine "zap", 1200 → 300 Hz.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const DURATION: f64 = 0.3;

pub fn effect() -> impl GraphNode {
    OscNode::sine(1200.0)
        .sweep_to(300.0, 0.3)
        .amplify(EnvNode::decay(0.3, 0.01, 0.3))
}
