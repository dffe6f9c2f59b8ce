//! What the control side needs from its environment: an audio-accurate
//! clock, and a cooperative loop for timers and display refreshes.

pub mod clock;
pub mod timer;

pub use clock::{AudioClock, ManualClock, SampleClock};
pub use timer::{EventLoop, FrameHandle, TimerHandle};
