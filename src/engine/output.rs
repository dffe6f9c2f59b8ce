#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    graph::{AnalysisTap, GraphMessage},
    host::clock::AudioClock,
};
#[cfg(feature = "rtrb")]
use crate::{
    config::AudioConfig,
    graph::SignalGraph,
    host::clock::SampleClock,
};

/// Control-side handle on an opened audio output.
pub trait AudioOutput: AudioClock {
    fn sample_rate(&self) -> f32;

    /// Hand a message to the renderer. Returns false if it could not be
    /// delivered (queue full, device gone).
    fn dispatch(&mut self, msg: GraphMessage) -> bool;

    /// Pull any newly rendered samples into the analysis tap.
    fn sync_tap(&mut self) {}

    fn tap(&self) -> Option<&AnalysisTap>;
}

/// Render half of an rtrb-connected signal chain.
#[cfg(feature = "rtrb")]
pub type RingGraph = SignalGraph<Consumer<GraphMessage>, Producer<f32>>;

#[cfg(feature = "rtrb")]
const MESSAGE_CAPACITY: usize = 256;

/// Control half of an rtrb-connected signal chain.
#[cfg(feature = "rtrb")]
pub struct RingOutput {
    msg_tx: Producer<GraphMessage>,
    tap_rx: Consumer<f32>,
    tap: AnalysisTap,
    clock: SampleClock,
}

/// Build both halves of a signal chain. The graph goes to whoever renders
/// audio (a device callback, or a test pulling blocks by hand).
#[cfg(feature = "rtrb")]
pub fn signal_chain(sample_rate: f32, config: &AudioConfig) -> (RingOutput, RingGraph) {
    let (msg_tx, msg_rx) = RingBuffer::<GraphMessage>::new(MESSAGE_CAPACITY);
    // Room for a few snapshots between UI frames
    let (tap_tx, tap_rx) = RingBuffer::<f32>::new(config.tap_resolution.max(1) * 4);

    let clock = SampleClock::new(sample_rate);
    let graph = SignalGraph::new(msg_rx, tap_tx, clock.clone());
    let output = RingOutput {
        msg_tx,
        tap_rx,
        tap: AnalysisTap::new(config.tap_resolution),
        clock,
    };
    (output, graph)
}

#[cfg(feature = "rtrb")]
impl AudioClock for RingOutput {
    fn now(&self) -> f64 {
        self.clock.now()
    }
}

#[cfg(feature = "rtrb")]
impl AudioOutput for RingOutput {
    fn sample_rate(&self) -> f32 {
        self.clock.sample_rate()
    }

    fn dispatch(&mut self, msg: GraphMessage) -> bool {
        match self.msg_tx.push(msg) {
            Ok(()) => true,
            Err(rtrb::PushError::Full(msg)) => {
                tracing::warn!(?msg, "graph message queue full, dropping");
                false
            }
        }
    }

    fn sync_tap(&mut self) {
        while let Ok(sample) = self.tap_rx.pop() {
            self.tap.push(sample);
        }
    }

    fn tap(&self) -> Option<&AnalysisTap> {
        Some(&self.tap)
    }
}
