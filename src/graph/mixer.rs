use crate::{
    dsp::amplify::{accumulate, apply_gain},
    graph::{
        message::{GraphMessage, MessageReceiver},
        tap::TapSink,
        voice::Voice,
    },
    host::clock::{AudioClock, SampleClock},
    MAX_BLOCK_SIZE,
};

/*
Signal Graph
============

The audio-thread half of the engine. Each render call:

  1. drains pending control messages (new voices, master gain, silence)
  2. sums every live voice into the master bus at sample accuracy
  3. applies master gain
  4. copies the bus to the analysis tap
  5. advances the shared sample clock

  voice ─┐
  voice ─┼──→ (+) ──→ × master ──→ output
  voice ─┘                   └──→ tap

Sample accuracy
---------------
A voice scheduled for absolute time t starts at the first frame whose time
is ≥ t:

    offset = ceil((t - block_start) · sample_rate)

Voices whose start lies beyond the block wait for a later one. A start time
already in the past plays from its beginning at offset 0; nothing is
skipped, it is merely late.
*/

const VOICE_CAPACITY: usize = 64;

pub struct SignalGraph<R: MessageReceiver, T: TapSink = ()> {
    rx: R,
    tap: T,
    voices: Vec<Voice>,
    master_gain: f32,
    clock: SampleClock,
    temp_buffer: Vec<f32>,
}

impl<R: MessageReceiver, T: TapSink> SignalGraph<R, T> {
    pub fn new(rx: R, tap: T, clock: SampleClock) -> Self {
        Self {
            rx,
            tap,
            voices: Vec::with_capacity(VOICE_CAPACITY),
            master_gain: 1.0,
            clock,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    pub fn tap(&self) -> &T {
        &self.tap
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// Fill `out` with the next samples of the master bus.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        self.process_messages();

        out.fill(0.0);
        let frames = out.len();
        let sample_rate = self.clock.sample_rate();
        let block_start = self.clock.now();

        for voice in &mut self.voices {
            let offset = if voice.elapsed() > 0.0 {
                0
            } else {
                let lead = ((voice.start - block_start) * sample_rate as f64).ceil();
                if lead <= 0.0 {
                    0
                } else {
                    lead as usize
                }
            };
            if offset >= frames {
                continue;
            }

            let span = &mut self.temp_buffer[..frames - offset];
            voice.render(span, sample_rate);
            accumulate(&mut out[offset..], span, 1.0);
        }

        self.voices.retain(|voice| !voice.is_finished());

        apply_gain(out, self.master_gain);
        self.tap.push_block(out);
        self.clock.advance(frames);
    }

    fn process_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                GraphMessage::Play(voice) => self.voices.push(voice),
                GraphMessage::SetMasterGain(gain) => self.master_gain = gain,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{envelope::EnvNode, extensions::NodeExt, tap::AnalysisTap},
        voices::Instrument,
    };
    use std::collections::VecDeque;

    fn constant_voice(start: f64, duration: f64, gain: f32) -> Voice {
        let node = EnvNode::decay(1.0, 0.5, 10.0).boxed();
        Voice::new(Instrument::Lead, start, duration, gain, node)
    }

    #[test]
    fn voice_starts_on_its_sample() {
        let mut queue = VecDeque::new();
        queue.push_back(GraphMessage::Play(constant_voice(0.005, 1.0, 1.0)));
        let mut graph = SignalGraph::new(queue, (), SampleClock::new(1_000.0));

        let mut out = [0.0f32; 10];
        graph.render(&mut out);

        assert!(out[..5].iter().all(|&s| s == 0.0));
        assert_eq!(out[5], 1.0);
    }

    #[test]
    fn late_voice_plays_from_its_beginning() {
        let clock = SampleClock::new(1_000.0);
        clock.advance(100);

        let mut queue = VecDeque::new();
        queue.push_back(GraphMessage::Play(constant_voice(0.05, 1.0, 1.0)));
        let mut graph = SignalGraph::new(queue, (), clock);

        let mut out = [0.0f32; 4];
        graph.render(&mut out);
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn finished_voices_are_dropped() {
        let mut queue = VecDeque::new();
        queue.push_back(GraphMessage::Play(constant_voice(0.0, 0.004, 1.0)));
        let mut graph = SignalGraph::new(queue, (), SampleClock::new(1_000.0));

        let mut out = [0.0f32; 8];
        graph.render(&mut out);
        assert_eq!(graph.active_voices(), 0);
        assert!(out[4..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn master_gain_scales_bus_and_tap() {
        let mut queue = VecDeque::new();
        queue.push_back(GraphMessage::SetMasterGain(0.5));
        queue.push_back(GraphMessage::Play(constant_voice(0.0, 1.0, 0.5)));
        let mut graph = SignalGraph::new(queue, AnalysisTap::new(4), SampleClock::new(1_000.0));

        let mut out = [0.0f32; 4];
        graph.render(&mut out);

        assert_eq!(out[0], 0.25);
        assert_eq!(graph.tap().read_floats()[0], 0.25);
        assert_eq!(graph.clock().frames(), 4);
    }

    #[test]
    fn long_buffers_render_in_chunks() {
        let mut graph = SignalGraph::new(VecDeque::new(), (), SampleClock::new(48_000.0));
        let mut out = vec![1.0f32; MAX_BLOCK_SIZE * 2 + 17];
        graph.render(&mut out);

        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(graph.clock().frames(), out.len() as u64);
    }
}
