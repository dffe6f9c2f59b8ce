//! The sound bank: one recipe per track.
//!
//! Each recipe is a ready-to-use node graph built fresh for every trigger and
//! thrown away once it stops. Voices never share nodes, so two overlapping
//! kicks are two independent graphs.
//!
//! # Example
//!
//! ```ignore
//! use drumgrid::voices::{self, Instrument};
//!
//! let kick = voices::kick();
//! let node = Instrument::Snare.build(&mut rng, 48_000.0);
//! ```

mod bass;
mod chord;
mod effect;
mod hihat;
mod kick;
mod lead;
mod percussion;
mod snare;

pub use bass::bass;
pub use chord::chord;
pub use effect::effect;
pub use hihat::hihat;
pub use kick::kick;
pub use lead::lead;
pub use percussion::percussion;
pub use snare::snare;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    dsp::oscillator::noise_buffer,
    graph::{extensions::NodeExt, GraphNode},
};

/// The fixed track set, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Kick,
    Snare,
    Hihat,
    Percussion,
    Bass,
    Lead,
    Chord,
    Effect,
}

impl Instrument {
    pub const ALL: [Instrument; 8] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::Hihat,
        Instrument::Percussion,
        Instrument::Bass,
        Instrument::Lead,
        Instrument::Chord,
        Instrument::Effect,
    ];

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable track id.
    pub fn as_str(self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
            Instrument::Hihat => "hihat",
            Instrument::Percussion => "percussion",
            Instrument::Bass => "bass",
            Instrument::Lead => "lead",
            Instrument::Chord => "chord",
            Instrument::Effect => "effect",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Kick => "Kick",
            Instrument::Snare => "Snare",
            Instrument::Hihat => "Hi-hat",
            Instrument::Percussion => "Percussion",
            Instrument::Bass => "Bass",
            Instrument::Lead => "Lead",
            Instrument::Chord => "Chord/Pad",
            Instrument::Effect => "Effect",
        }
    }

    /// Seconds after the trigger at which every source of the recipe stops.
    pub fn duration(self) -> f64 {
        match self {
            Instrument::Kick => kick::DURATION,
            Instrument::Snare => snare::DURATION,
            Instrument::Hihat => hihat::DURATION,
            Instrument::Percussion => percussion::DURATION,
            Instrument::Bass => bass::DURATION,
            Instrument::Lead => lead::DURATION,
            Instrument::Chord => chord::DURATION,
            Instrument::Effect => effect::DURATION,
        }
    }

    /// Build a fresh node graph for one trigger. Noise-based recipes draw
    /// their buffer from `rng`.
    pub fn build(self, rng: &mut SmallRng, sample_rate: f32) -> Box<dyn GraphNode> {
        match self {
            Instrument::Kick => kick().boxed(),
            Instrument::Snare => {
                snare(noise_buffer(rng, snare::NOISE_SECONDS, sample_rate)).boxed()
            }
            Instrument::Hihat => {
                hihat(noise_buffer(rng, hihat::NOISE_SECONDS, sample_rate)).boxed()
            }
            Instrument::Percussion => percussion().boxed(),
            Instrument::Bass => bass().boxed(),
            Instrument::Lead => lead().boxed(),
            Instrument::Chord => chord().boxed(),
            Instrument::Effect => effect().boxed(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInstrument(pub String);

impl fmt::Display for UnknownInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown track id '{}'", self.0)
    }
}

impl std::error::Error for UnknownInstrument {}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|instrument| instrument.as_str() == s)
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}
