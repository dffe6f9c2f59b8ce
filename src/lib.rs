pub mod app; // Owned aggregate wiring every component together
pub mod config;
pub mod dsp;
pub mod engine; // Sound bank front: lazy init, track volumes, dispatch
pub mod error;
pub mod graph; // Composable audio graph nodes and the mixer
pub mod host; // Clocks and the cooperative event loop
pub mod scope; // Oscilloscope rasterization
pub mod sequencing; // Pattern store, tempo and the lookahead scheduler
pub mod voices;

pub use app::{Drumgrid, PlaybackEvent, Transport};
pub use config::Config;
pub use error::{Error, Result};
pub use voices::Instrument;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Number of steps in every track.
pub const STEPS: usize = 16;
