#[cfg(feature = "rtrb")]
use rtrb::Producer;

/*
Analysis Tap
============

The tap sits on the master bus after master gain and keeps the most recent
`resolution` samples in a ring:

    write ──→ [ . . . . . . . . ] ──→ oldest … newest

Reads are snapshots: oldest first, always exactly `resolution` values. Before
anything has played the ring is silence, which reads back as the byte 128 on
every position (the oscilloscope's flat line).

Byte encoding follows the usual unsigned 8-bit PCM layout:

    byte = clamp(128 · (x + 1), 0, 255)        x ∈ [-1, 1]

so 0.0 → 128, -1.0 → 0, +1.0 → 255 after clamping.
*/

pub const DEFAULT_RESOLUTION: usize = 2048;

/// Destination for master-bus samples after each rendered block.
pub trait TapSink {
    fn push_block(&mut self, samples: &[f32]);
}

/// Audio-thread side of a tap living on another thread. Samples that do not
/// fit are dropped; the reader only ever wants the latest window.
#[cfg(feature = "rtrb")]
impl TapSink for Producer<f32> {
    fn push_block(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.push(sample).is_err() {
                break;
            }
        }
    }
}

/// Rendering without anyone listening.
impl TapSink for () {
    fn push_block(&mut self, _samples: &[f32]) {}
}

#[derive(Debug, Clone)]
pub struct AnalysisTap {
    ring: Vec<f32>,
    write_pos: usize,
}

impl AnalysisTap {
    pub fn new(resolution: usize) -> Self {
        Self {
            ring: vec![0.0; resolution.max(1)],
            write_pos: 0,
        }
    }

    pub fn resolution(&self) -> usize {
        self.ring.len()
    }

    pub fn push(&mut self, sample: f32) {
        self.ring[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.ring.len();
    }

    /// Most recent window as floats, oldest first.
    pub fn read_floats(&self) -> Vec<f32> {
        self.iter_oldest_first().collect()
    }

    /// Copy the window into `dest` as bytes, oldest first.
    pub fn read_bytes(&self, dest: &mut [u8]) {
        for (slot, sample) in dest.iter_mut().zip(self.iter_oldest_first()) {
            *slot = to_byte(sample);
        }
    }

    fn iter_oldest_first(&self) -> impl Iterator<Item = f32> + '_ {
        let (newest, oldest) = self.ring.split_at(self.write_pos);
        oldest.iter().chain(newest.iter()).copied()
    }
}

impl Default for AnalysisTap {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}

impl TapSink for AnalysisTap {
    fn push_block(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.push(sample);
        }
    }
}

#[inline]
fn to_byte(sample: f32) -> u8 {
    (128.0 * (sample + 1.0)).clamp(0.0, 255.0) as u8
}
