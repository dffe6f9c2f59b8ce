//! The sound bank's front door.
//!
//! `AudioEngine` owns the control half of the audio output and turns
//! "play this track at time t" into a freshly built voice on the render
//! side. The output is opened lazily the first time something needs it;
//! until then every trigger is refused and the clock reads zero.

pub mod output;

pub use output::AudioOutput;
#[cfg(feature = "rtrb")]
pub use output::{signal_chain, RingGraph, RingOutput};

use rand::{rngs::SmallRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    config::AudioConfig,
    error::Result,
    graph::{AnalysisTap, GraphMessage, Voice},
    host::clock::AudioClock,
    sequencing::SoundTrigger,
    voices::Instrument,
};

/// Opens the platform audio output. Called again after a failure.
pub type OutputOpener = Box<dyn FnMut() -> Result<Box<dyn AudioOutput>>>;

pub struct AudioEngine {
    output: Option<Box<dyn AudioOutput>>,
    opener: OutputOpener,
    track_volumes: [f32; Instrument::ALL.len()],
    master_volume: f32,
    rng: SmallRng,
}

impl AudioEngine {
    pub fn new(
        config: &AudioConfig,
        opener: impl FnMut() -> Result<Box<dyn AudioOutput>> + 'static,
    ) -> Self {
        Self {
            output: None,
            opener: Box::new(opener),
            track_volumes: [1.0; Instrument::ALL.len()],
            master_volume: clamp_volume(config.master_volume).unwrap_or(1.0),
            rng: SmallRng::seed_from_u64(config.noise_seed),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.output.is_some()
    }

    /// Open the output if it is not open yet. A failure leaves the engine
    /// uninitialized so a later call can retry.
    pub fn ensure_initialized(&mut self) -> Result<()> {
        if self.output.is_some() {
            return Ok(());
        }

        let mut output = (self.opener)().inspect_err(|err| {
            warn!(%err, "audio output unavailable");
        })?;
        output.dispatch(GraphMessage::SetMasterGain(self.master_volume));
        info!(sample_rate = output.sample_rate(), "audio output opened");

        self.output = Some(output);
        Ok(())
    }

    /// Build `instrument`'s recipe and schedule it at absolute time `at`.
    /// Returns false when no output is open or the voice was not accepted.
    pub fn play(&mut self, instrument: Instrument, at: f64) -> bool {
        let Some(output) = self.output.as_mut() else {
            debug!(%instrument, "trigger ignored, audio not initialized");
            return false;
        };

        let node = instrument.build(&mut self.rng, output.sample_rate());
        let gain = self.track_volumes[instrument.index()];
        let voice = Voice::new(instrument, at, instrument.duration(), gain, node);
        output.dispatch(GraphMessage::Play(voice))
    }

    /// Set a track's volume for sounds triggered from now on.
    pub fn set_track_volume(&mut self, instrument: Instrument, volume: f32) {
        match clamp_volume(volume) {
            Some(volume) => self.track_volumes[instrument.index()] = volume,
            None => warn!(%instrument, volume, "ignoring invalid track volume"),
        }
    }

    pub fn track_volume(&self, instrument: Instrument) -> f32 {
        self.track_volumes[instrument.index()]
    }

    /// Set the master volume. Applies to everything rendered after the change.
    pub fn set_master_volume(&mut self, volume: f32) {
        let Some(volume) = clamp_volume(volume) else {
            warn!(volume, "ignoring invalid master volume");
            return;
        };
        self.master_volume = volume;
        if let Some(output) = self.output.as_mut() {
            output.dispatch(GraphMessage::SetMasterGain(volume));
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Cut every sounding voice.
    /// Drain rendered samples into the analysis tap so the render side
    /// never blocks on a full ring.
    pub fn sync_tap(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.sync_tap();
        }
    }

    /// Latest analysis snapshot source, or None before initialization.
    pub fn analysis_tap(&mut self) -> Option<&AnalysisTap> {
        self.sync_tap();
        self.output.as_ref()?.tap()
    }
}

impl AudioClock for AudioEngine {
    fn now(&self) -> f64 {
        self.output.as_ref().map_or(0.0, |output| output.now())
    }
}

impl SoundTrigger for AudioEngine {
    fn trigger(&mut self, instrument: Instrument, at: f64) {
        self.play(instrument, at);
    }
}

/// Clamp to [0, 1]; None for NaN and infinities.
fn clamp_volume(volume: f32) -> Option<f32> {
    volume.is_finite().then(|| volume.clamp(0.0, 1.0))
}
