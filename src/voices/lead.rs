//! Lead voice: a plain square at A4 with a short decay.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const DURATION: f64 = 0.3;

pub fn lead() -> impl GraphNode {
    OscNode::square(440.0).amplify(EnvNode::decay(0.5, 0.01, 0.3))
}
