//! Real-world scenario benchmarks.
//!
//! Complete sound bank recipes, and a busy pattern rendered through the
//! master bus the way the audio callback does it.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
