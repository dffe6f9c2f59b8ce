#[cfg(feature = "rtrb")]
use rtrb::Consumer;
use std::collections::VecDeque;

use crate::graph::voice::Voice;

/// Control-thread → audio-thread commands.
pub enum GraphMessage {
    /// Start a fully built voice at its absolute start time.
    Play(Voice),
    SetMasterGain(f32),
}

impl std::fmt::Debug for GraphMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphMessage::Play(voice) => f
                .debug_struct("Play")
                .field("instrument", &voice.instrument)
                .field("start", &voice.start)
                .finish(),
            GraphMessage::SetMasterGain(gain) => f.debug_tuple("SetMasterGain").field(gain).finish(),
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<GraphMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<GraphMessage> {
    fn pop(&mut self) -> Option<GraphMessage> {
        Consumer::pop(self).ok()
    }
}

/// Offline rendering and tests feed the graph from a plain queue.
impl MessageReceiver for VecDeque<GraphMessage> {
    fn pop(&mut self) -> Option<GraphMessage> {
        self.pop_front()
    }
}
