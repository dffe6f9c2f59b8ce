//! cpal output: the device callback owns the signal graph.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use drumgrid::{
    config::AudioConfig,
    engine::{signal_chain, AudioOutput, RingOutput},
    graph::{AnalysisTap, GraphMessage},
    host::AudioClock,
    Error, MAX_BLOCK_SIZE,
};

/// Control-side handle; keeps the stream alive as long as it exists.
pub struct CpalOutput {
    ring: RingOutput,
    _stream: cpal::Stream,
}

impl AudioClock for CpalOutput {
    fn now(&self) -> f64 {
        self.ring.now()
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> f32 {
        self.ring.sample_rate()
    }

    fn dispatch(&mut self, msg: GraphMessage) -> bool {
        self.ring.dispatch(msg)
    }

    fn sync_tap(&mut self) {
        self.ring.sync_tap();
    }

    fn tap(&self) -> Option<&AnalysisTap> {
        self.ring.tap()
    }
}

/// Deferred device opening for `Drumgrid::new`.
pub fn opener(config: AudioConfig) -> impl FnMut() -> drumgrid::Result<Box<dyn AudioOutput>> {
    move || open(&config).map(|output| Box::new(output) as Box<dyn AudioOutput>)
}

fn open(config: &AudioConfig) -> drumgrid::Result<CpalOutput> {
    let unavailable = |err: &dyn std::fmt::Display| Error::AudioUnavailable(err.to_string());

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::AudioUnavailable("no default output device available".into()))?;
    let stream_config = device
        .default_output_config()
        .map_err(|err| unavailable(&err))?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;

    let (ring, mut graph) = signal_chain(sample_rate, config);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    graph.render(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )
        .map_err(|err| unavailable(&err))?;

    stream.play().map_err(|err| unavailable(&err))?;

    Ok(CpalOutput {
        ring,
        _stream: stream,
    })
}
