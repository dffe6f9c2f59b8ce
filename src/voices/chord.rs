//! Chord/pad voice.
//!
//! C major triad (C4, E4, G4) as three sines, each with its own envelope.
//! Levels are kept low so the summed peak stays at 0.6.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const DURATION: f64 = 0.5;

pub const TRIAD: [f32; 3] = [261.63, 329.63, 392.00];

pub fn chord() -> impl GraphNode {
    let [root, third, fifth] = TRIAD.map(|freq| {
        OscNode::sine(freq).amplify(EnvNode::decay(0.2, 0.01, 0.5))
    });

    root.mix(third).mix(fifth)
}
