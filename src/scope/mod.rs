/*
Oscilloscope Rasterization
==========================

Each display tick turns the latest analysis snapshot into a polyline sized
for the current view. Nothing here knows about terminals or canvases; the
front end draws whatever the frame describes.

Signal trace
------------
Snapshots arrive as unsigned bytes (128 = silence). For sample i of n:

    v = byte / 128 - 1                  (-1 .. ~1)
    x = i · width / n
    y = center_y + v · center_y · 0.9   (full scale reaches 90% of half-height)

A silent tap therefore draws a flat line exactly on the center.

Placeholder
-----------
Without a tap there is nothing to measure, so a fixed two-sine doodle is
drawn at every integer x, labelled "No Audio Signal":

    y = center_y + sin(0.02x) · 0.2h + sin(0.04x) · 0.05h

Grid
----
Horizontal lines every h/8, vertical lines every w/16, plus the center line.

  ┌───┬───┬───┬───┐
  ├───┼───┼───┼───┤
  ├═══╪═══╪═══╪═══┤  ← center
  ├───┼───┼───┼───┤
  └───┴───┴───┴───┘
*/

use tracing::debug;

use crate::{
    config::ScopeConfig,
    graph::AnalysisTap,
    host::{EventLoop, FrameHandle},
};

pub const NO_SIGNAL_LABEL: &str = "No Audio Signal";

/// Vertical offset of the placeholder label below the center line.
const LABEL_OFFSET: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Signal,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// y of each horizontal line
    pub horizontal: Vec<f32>,
    /// x of each vertical line
    pub vertical: Vec<f32>,
    pub center: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub x: f32,
    pub y: f32,
}

/// One rasterized oscilloscope frame, in view coordinates (y grows down).
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformFrame {
    pub width: f32,
    pub height: f32,
    pub kind: FrameKind,
    pub points: Vec<(f32, f32)>,
    pub grid: GridLines,
    pub label: Option<Label>,
}

pub struct WaveformRenderer {
    amplitude_scale: f32,
    frame: Option<FrameHandle>,
    animating: bool,
    bytes: Vec<u8>,
}

impl WaveformRenderer {
    pub fn new(config: &ScopeConfig) -> Self {
        Self {
            amplitude_scale: config.amplitude_scale,
            frame: None,
            animating: false,
            bytes: Vec::new(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Rasterize the tap's current snapshot, or the placeholder without one.
    pub fn render(&mut self, tap: Option<&AnalysisTap>, width: f32, height: f32) -> WaveformFrame {
        let grid = grid_lines(width, height);
        match tap {
            Some(tap) => {
                self.bytes.resize(tap.resolution(), 128);
                tap.read_bytes(&mut self.bytes);
                WaveformFrame {
                    width,
                    height,
                    kind: FrameKind::Signal,
                    points: trace(&self.bytes, width, height, self.amplitude_scale),
                    grid,
                    label: None,
                }
            }
            None => WaveformFrame {
                width,
                height,
                kind: FrameKind::Placeholder,
                points: placeholder(width, height),
                grid,
                label: Some(Label {
                    text: NO_SIGNAL_LABEL,
                    x: width / 2.0,
                    y: height / 2.0 + LABEL_OFFSET,
                }),
            },
        }
    }

    /// Begin redrawing on every display refresh. Restarting replaces any
    /// pending request.
    pub fn start_animation<T>(&mut self, event_loop: &mut EventLoop<T>, task: T) {
        if let Some(handle) = self.frame.take() {
            event_loop.cancel_frame(handle);
        }
        self.frame = Some(event_loop.request_frame(task));
        self.animating = true;
        debug!("waveform animation started");
    }

    /// Handle a refresh: draw, then re-arm if still animating.
    pub fn on_frame<T>(
        &mut self,
        event_loop: &mut EventLoop<T>,
        task: T,
        tap: Option<&AnalysisTap>,
        width: f32,
        height: f32,
    ) -> WaveformFrame {
        self.frame = None;
        let frame = self.render(tap, width, height);
        if self.animating {
            self.frame = Some(event_loop.request_frame(task));
        }
        frame
    }

    /// Cancel the pending refresh (safe to call repeatedly) and draw one
    /// final still frame.
    pub fn stop_animation<T>(
        &mut self,
        event_loop: &mut EventLoop<T>,
        tap: Option<&AnalysisTap>,
        width: f32,
        height: f32,
    ) -> WaveformFrame {
        if let Some(handle) = self.frame.take() {
            event_loop.cancel_frame(handle);
        }
        if self.animating {
            debug!("waveform animation stopped");
        }
        self.animating = false;
        self.render(tap, width, height)
    }
}

fn trace(bytes: &[u8], width: f32, height: f32, amplitude_scale: f32) -> Vec<(f32, f32)> {
    let center_y = height / 2.0;
    let slice_width = width / bytes.len().max(1) as f32;

    bytes
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            let v = byte as f32 / 128.0 - 1.0;
            (i as f32 * slice_width, center_y + v * center_y * amplitude_scale)
        })
        .collect()
}

fn placeholder(width: f32, height: f32) -> Vec<(f32, f32)> {
    let center_y = height / 2.0;
    let columns = width.max(0.0).ceil() as usize;

    (0..columns)
        .map(|x| {
            let x = x as f32;
            let y = center_y + (x * 0.02).sin() * (height * 0.2) + (x * 0.04).sin() * (height * 0.05);
            (x, y)
        })
        .collect()
}

fn grid_lines(width: f32, height: f32) -> GridLines {
    let spaced = |extent: f32, divisions: usize| -> Vec<f32> {
        if extent <= 0.0 {
            return Vec::new();
        }
        let spacing = extent / divisions as f32;
        (0..divisions).map(|i| i as f32 * spacing).collect()
    };

    GridLines {
        horizontal: spaced(height, 8),
        vertical: spaced(width, 16),
        center: height / 2.0,
    }
}
