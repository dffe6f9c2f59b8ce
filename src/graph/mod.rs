//! Composable building blocks for the sound bank and the mixer that plays them.
//!
//! Nodes render in voice-local time and are assembled with the fluent helpers
//! in `extensions`. The `mixer` owns every live voice on the audio thread and
//! feeds the master bus to the analysis `tap`.

/// Multiply two signals together (envelope control).
pub mod amplify;
/// Amplitude envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`, `.through()`).
pub mod extensions;
/// State-variable filter node with a sweepable cutoff.
pub mod filter;
/// Control messages sent to the audio thread.
pub mod message;
/// Parallel summing of two nodes.
pub mod mix;
/// Master bus: live voices, master gain, sample clock.
pub mod mixer;
/// Core traits shared by all graph nodes.
pub mod node;
/// One-shot noise buffer playback.
pub mod noise;
/// Audio-band oscillators with swept frequency.
pub mod oscillator;
/// Rolling window of master-bus samples for visualisation.
pub mod tap;
/// Serial chaining of two nodes (source → effect).
pub mod through;
/// A triggered node chain with its timeline position.
pub mod voice;

pub use message::{GraphMessage, MessageReceiver};
pub use mixer::SignalGraph;
pub use node::{GraphNode, RenderCtx};
pub use tap::{AnalysisTap, TapSink};
pub use voice::Voice;
