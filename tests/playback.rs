//! End-to-end playback: the aggregate drives the real signal graph, rendered
//! offline block by block. Host time and audio time are the same clock.

use std::{cell::RefCell, rc::Rc};

use drumgrid::{
    config::{AudioConfig, Config},
    engine::{signal_chain, AudioOutput, RingGraph},
    scope::FrameKind,
    sequencing::{PatternStore, Scheduler, Tempo, TrackPattern},
    Drumgrid, Instrument, PlaybackEvent, Transport,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 256;

struct Harness {
    grid: Drumgrid,
    graph: Rc<RefCell<Option<RingGraph>>>,
    rendered: Vec<f32>,
}

impl Harness {
    fn new() -> Self {
        let graph = Rc::new(RefCell::new(None));
        let slot = graph.clone();
        let grid = Drumgrid::new(&Config::default(), move || {
            let (output, render_side) = signal_chain(SAMPLE_RATE, &AudioConfig::default());
            *slot.borrow_mut() = Some(render_side);
            Ok(Box::new(output) as Box<dyn AudioOutput>)
        });
        Self {
            grid,
            graph,
            rendered: Vec::new(),
        }
    }

    fn now(&self) -> f64 {
        self.rendered.len() as f64 / SAMPLE_RATE as f64
    }

    /// Render audio up to `seconds`, firing timers between blocks.
    fn run_until(&mut self, seconds: f64) {
        let mut block = [0.0f32; BLOCK];
        while self.now() < seconds {
            self.grid.run_timers(self.now());
            if let Some(graph) = self.graph.borrow_mut().as_mut() {
                graph.render(&mut block);
            } else {
                block.fill(0.0);
            }
            self.rendered.extend_from_slice(&block);
        }
        self.grid.run_timers(self.now());
    }

    fn window(&self, from: f64, to: f64) -> &[f32] {
        let index = |t: f64| ((t * SAMPLE_RATE as f64) as usize).min(self.rendered.len());
        &self.rendered[index(from)..index(to)]
    }
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

fn only(track: &str, steps: &[usize]) -> Vec<TrackPattern> {
    let row: Vec<bool> = (0..16).map(|i| steps.contains(&i)).collect();
    vec![TrackPattern::new(track, row)]
}

#[test]
fn kick_on_quarters_lands_on_the_beat() {
    let mut h = Harness::new();
    h.grid.load_pattern(&only("kick", &[0, 4, 8, 12]));
    h.grid.start().unwrap();
    h.run_until(2.0);

    for beat in [0.0, 0.5, 1.0, 1.5] {
        // Sound right at the beat, silence after the 0.3 s kick stops
        assert!(peak(h.window(beat, beat + 0.01)) > 0.5, "no kick at {beat}");
        assert_eq!(peak(h.window(beat + 0.301, beat + 0.499)), 0.0, "leak after {beat}");
    }
}

#[test]
fn track_volume_affects_only_later_triggers() {
    let mut h = Harness::new();
    h.grid.load_pattern(&only("kick", &[0, 4]));
    h.grid.start().unwrap();

    // Step 0 is committed, step 4 (at 0.5 s) is not yet
    h.run_until(0.2);
    h.grid.set_track_volume("kick", 0.5);
    h.run_until(1.0);

    let first = peak(h.window(0.0, 0.3));
    let second = peak(h.window(0.5, 0.8));
    assert!((second / first - 0.5).abs() < 1e-3, "{first} vs {second}");
}

#[test]
fn master_volume_scales_everything_after_the_change() {
    let mut h = Harness::new();
    h.grid.load_pattern(&only("lead", &[0, 8]));
    h.grid.start().unwrap();
    h.run_until(0.5);
    h.grid.set_master_volume(0.25);
    h.run_until(1.5);

    let first = peak(h.window(0.0, 0.3));
    let second = peak(h.window(1.0, 1.3));
    assert!((second / first - 0.25).abs() < 1e-3, "{first} vs {second}");
}

#[test]
fn pattern_edits_apply_on_next_pass() {
    let mut h = Harness::new();
    h.grid.start().unwrap();
    h.run_until(0.5);
    assert_eq!(peak(&h.rendered), 0.0);

    // Step 8 sounds at 1.0 s, far outside the current lookahead window
    assert!(h.grid.toggle_step("snare", 8));
    h.run_until(1.3);
    assert!(peak(h.window(1.0, 1.2)) > 0.1);
}

#[test]
fn playhead_events_track_audio_and_stop_clears() {
    let mut h = Harness::new();
    h.grid.start().unwrap();
    h.run_until(0.3);

    let steps: Vec<Option<usize>> = h
        .grid
        .poll_events()
        .into_iter()
        .map(|PlaybackEvent::StepAdvanced(step)| step)
        .collect();
    assert_eq!(steps, [Some(0), Some(1), Some(2)]);

    h.grid.stop();
    assert_eq!(h.grid.poll_events(), [PlaybackEvent::StepAdvanced(None)]);
    h.run_until(1.0);
    assert!(h.grid.poll_events().is_empty());

    // Restart from the top
    h.grid.start().unwrap();
    h.run_until(1.01);
    assert_eq!(h.grid.poll_events(), [PlaybackEvent::StepAdvanced(Some(0))]);
}

#[test]
fn pause_holds_playhead_and_start_rewinds() {
    let mut h = Harness::new();
    h.grid.load_pattern(&only("kick", &[0]));
    h.grid.start().unwrap();
    h.run_until(0.3);
    h.grid.pause();
    assert_eq!(h.grid.transport(), Transport::Paused);

    // Indicators already armed may still land; nothing new is scheduled
    h.run_until(1.0);
    h.grid.poll_events();
    assert!(h.grid.playhead().is_some_and(|step| step > 0));

    h.grid.start().unwrap();
    h.run_until(1.01);
    assert_eq!(
        h.grid.poll_events().first(),
        Some(&PlaybackEvent::StepAdvanced(Some(0)))
    );
    // Step 0 sounds again right at the restart
    assert!(peak(h.window(1.0, 1.01)) > 0.5);
}

#[test]
fn oscilloscope_shows_placeholder_then_flat_line() {
    let mut h = Harness::new();
    assert_eq!(h.grid.waveform().kind, FrameKind::Placeholder);

    h.grid.start().unwrap();
    h.run_until(0.1);
    let frame = h.grid.display_refresh(200.0, 100.0).cloned();

    let frame = frame.expect("animation should be running");
    assert_eq!(frame.kind, FrameKind::Signal);
    assert!(frame.points.iter().all(|&(_, y)| y == 50.0));
}

#[test]
fn scope_shows_recent_audio_after_idle_period() {
    let mut h = Harness::new();
    // Loud for 0.3 s while stopped, far more than the tap ring holds
    h.grid.audition(Instrument::Effect).unwrap();
    h.run_until(1.0);

    h.grid.start().unwrap();
    h.run_until(1.01);
    let frame = h.grid.display_refresh(200.0, 100.0).cloned();

    let frame = frame.expect("animation should be running");
    assert!(frame.points.iter().all(|&(_, y)| y == 50.0));
}

#[test]
fn audition_plays_immediately() {
    let mut h = Harness::new();
    h.grid.audition(Instrument::Effect).unwrap();
    assert_eq!(h.grid.transport(), Transport::Stopped);
    h.run_until(0.4);

    assert!(peak(h.window(0.0, 0.05)) > 0.1);
    assert_eq!(peak(h.window(0.31, 0.4)), 0.0);
}

#[test]
fn cursor_stays_exact_over_ten_thousand_steps() {
    let mut store = PatternStore::new();
    store.set_step(Instrument::Hihat, 0, true);

    let tempo = Tempo::new(133.0).unwrap();
    let sps = tempo.seconds_per_step();
    let mut scheduler = Scheduler::new(tempo);
    let mut sink: Vec<(Instrument, f64)> = Vec::new();
    let mut committed = Vec::new();

    scheduler.start(0.0);
    // Irregular ticks around the 25 ms lookahead
    let jitter = [0.021, 0.025, 0.019, 0.024, 0.023];
    let mut now = 0.0;
    let mut tick = 0;
    while committed.len() < 10_000 {
        committed.extend(scheduler.run(now, &store, &mut sink));
        now += jitter[tick % jitter.len()];
        tick += 1;
    }

    for (n, step) in committed.iter().enumerate() {
        assert_eq!(step.step, n % 16);
        assert!((step.time - n as f64 * sps).abs() < 1e-9, "step {n} drifted");
    }
    // One hi-hat per bar, on the bar line
    let bar_lines: Vec<f64> = committed.iter().filter(|s| s.step == 0).map(|s| s.time).collect();
    let hats: Vec<f64> = sink.iter().map(|&(_, t)| t).collect();
    assert_eq!(hats, bar_lines);
}
