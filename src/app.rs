//! Drumgrid - the whole instrument as one owned value.
//!
//! Wires the pattern store, scheduler, sound bank and oscilloscope to a
//! cooperative event loop. The host only has to do two things:
//!
//! - call `run_timers(now)` often (every few milliseconds)
//! - call `display_refresh(width, height)` once per screen refresh
//!
//! # Example
//!
//! ```ignore
//! let mut grid = Drumgrid::new(&Config::default(), open_output);
//! grid.load_demo();
//! grid.start()?;
//! loop {
//!     grid.run_timers(host_seconds());
//!     if let Some(frame) = grid.display_refresh(80.0, 20.0) { draw(frame) }
//!     for event in grid.poll_events() { highlight(event) }
//! }
//! ```

use std::time::Duration;
use tracing::{info, warn};

use crate::{
    config::{Config, TransportConfig},
    engine::{AudioEngine, AudioOutput},
    error::Result,
    host::{clock::AudioClock, EventLoop, TimerHandle},
    scope::{WaveformFrame, WaveformRenderer},
    sequencing::{
        demo_pattern, PatternStore, Scheduler, Tempo, TrackPattern, DEFAULT_LOOKAHEAD,
        DEFAULT_SCHEDULE_AHEAD,
    },
    voices::Instrument,
};

pub use crate::sequencing::Transport;

/// Work items queued on the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SchedulerTick,
    /// Move the visible playhead; fires when the step becomes audible.
    StepIndicator(usize),
    Redraw,
}

/// Notifications for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The visible playhead moved. None after a stop.
    StepAdvanced(Option<usize>),
}

pub struct Drumgrid {
    pattern: PatternStore,
    scheduler: Scheduler,
    engine: AudioEngine,
    scope: WaveformRenderer,
    event_loop: EventLoop<Task>,
    scheduler_timer: Option<TimerHandle>,
    indicator_timers: Vec<TimerHandle>,
    playhead: Option<usize>,
    events: Vec<PlaybackEvent>,
    last_frame: Option<WaveformFrame>,
    view: (f32, f32),
}

impl Drumgrid {
    /// `opener` is called the first time audio is needed (start or
    /// audition), and again on the next attempt if it fails.
    pub fn new(
        config: &Config,
        opener: impl FnMut() -> Result<Box<dyn AudioOutput>> + 'static,
    ) -> Self {
        let tempo = Tempo::new(config.transport.tempo).unwrap_or_else(|| {
            warn!(bpm = config.transport.tempo, "invalid configured tempo, using default");
            Tempo::default()
        });
        let (lookahead, schedule_ahead) = scheduler_timing(&config.transport);
        let scheduler = Scheduler::new(tempo).with_timing(lookahead, schedule_ahead);

        Self {
            pattern: PatternStore::new(),
            scheduler,
            engine: AudioEngine::new(&config.audio, opener),
            scope: WaveformRenderer::new(&config.scope),
            event_loop: EventLoop::new(),
            scheduler_timer: None,
            indicator_timers: Vec::new(),
            playhead: None,
            events: Vec::new(),
            last_frame: None,
            view: (0.0, 0.0),
        }
    }

    // Pattern

    pub fn toggle_step(&mut self, track_id: &str, index: usize) -> bool {
        self.pattern.toggle_step(track_id, index)
    }

    pub fn load_pattern(&mut self, data: &[TrackPattern]) {
        self.pattern.load_pattern(data);
    }

    pub fn load_demo(&mut self) {
        self.pattern.load_pattern(&demo_pattern());
    }

    pub fn clear_pattern(&mut self) {
        self.pattern.clear_pattern();
    }

    pub fn pattern_data(&self) -> Vec<TrackPattern> {
        self.pattern.pattern_data()
    }

    pub fn pattern(&self) -> &PatternStore {
        &self.pattern
    }

    // Transport

    /// Start playback, opening audio first if needed. Already running is a
    /// no-op; a failed audio open leaves everything stopped.
    pub fn start(&mut self) -> Result<()> {
        if self.scheduler.is_running() {
            return Ok(());
        }
        self.engine.ensure_initialized()?;

        self.scheduler.start(self.engine.now());
        self.scheduler_tick();
        self.scope.start_animation(&mut self.event_loop, Task::Redraw);
        Ok(())
    }

    /// Stop triggering, keep the step position.
    pub fn pause(&mut self) {
        if !self.scheduler.pause() {
            return;
        }
        self.cancel_scheduler_timer();
        self.stop_animation();
    }

    /// Halt, rewind and clear the playhead. Stopping twice is a no-op.
    pub fn stop(&mut self) {
        if !self.scheduler.stop() {
            return;
        }
        self.cancel_scheduler_timer();
        for handle in self.indicator_timers.drain(..) {
            self.event_loop.cancel(handle);
        }

        self.playhead = None;
        self.events.push(PlaybackEvent::StepAdvanced(None));
        self.stop_animation();
    }

    pub fn transport(&self) -> Transport {
        self.scheduler.transport()
    }

    /// Step currently shown as playing.
    pub fn playhead(&self) -> Option<usize> {
        self.playhead
    }

    pub fn set_tempo(&mut self, bpm: f64) -> bool {
        self.scheduler.set_tempo(bpm)
    }

    pub fn tempo(&self) -> f64 {
        self.scheduler.tempo().bpm()
    }

    // Sound

    pub fn set_track_volume(&mut self, track_id: &str, volume: f32) {
        match track_id.parse::<Instrument>() {
            Ok(instrument) => self.engine.set_track_volume(instrument, volume),
            Err(err) => warn!(%err, "volume change ignored"),
        }
    }

    pub fn track_volume(&self, instrument: Instrument) -> f32 {
        self.engine.track_volume(instrument)
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.engine.set_master_volume(volume);
    }

    pub fn master_volume(&self) -> f32 {
        self.engine.master_volume()
    }

    /// Play one track's sound right now.
    pub fn audition(&mut self, instrument: Instrument) -> Result<()> {
        self.engine.ensure_initialized()?;
        let now = self.engine.now();
        self.engine.play(instrument, now);
        Ok(())
    }

    /// Audio clock time, 0.0 before audio is opened.
    pub fn now(&self) -> f64 {
        self.engine.now()
    }

    pub fn is_audio_ready(&self) -> bool {
        self.engine.is_initialized()
    }

    // Host driving

    /// Fire every timer due at host time `now` (seconds).
    pub fn run_timers(&mut self, now: f64) {
        // The tap fills whether or not the scope is animating
        self.engine.sync_tap();
        for task in self.event_loop.take_due(now) {
            match task {
                Task::SchedulerTick => {
                    self.scheduler_timer = None;
                    if self.scheduler.is_running() {
                        self.scheduler_tick();
                    }
                }
                Task::StepIndicator(step) => {
                    let event_loop = &self.event_loop;
                    self.indicator_timers.retain(|&handle| event_loop.is_pending(handle));
                    self.playhead = Some(step);
                    self.events.push(PlaybackEvent::StepAdvanced(Some(step)));
                }
                Task::Redraw => {}
            }
        }
    }

    /// Handle one display refresh. Returns the frame drawn for it, if the
    /// oscilloscope is animating.
    pub fn display_refresh(&mut self, width: f32, height: f32) -> Option<&WaveformFrame> {
        self.view = (width, height);
        let mut drew = false;
        for task in self.event_loop.take_frame_tasks() {
            if task == Task::Redraw {
                let frame = self.scope.on_frame(
                    &mut self.event_loop,
                    Task::Redraw,
                    self.engine.analysis_tap(),
                    width,
                    height,
                );
                self.last_frame = Some(frame);
                drew = true;
            }
        }
        if drew {
            self.last_frame.as_ref()
        } else {
            None
        }
    }

    /// Most recent oscilloscope frame, drawn on demand if none exists yet.
    pub fn waveform(&mut self) -> &WaveformFrame {
        let (width, height) = self.view;
        let tap = self.engine.analysis_tap();
        let scope = &mut self.scope;
        self.last_frame
            .get_or_insert_with(|| scope.render(tap, width, height))
    }

    /// Drain playhead notifications.
    pub fn poll_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Host time of the next pending timer.
    pub fn next_deadline(&self) -> Option<f64> {
        self.event_loop.next_deadline()
    }

    fn scheduler_tick(&mut self) {
        let now = self.engine.now();
        let committed = self.scheduler.run(now, &self.pattern, &mut self.engine);

        for step in committed {
            let delay = Duration::from_secs_f64((step.time - now).max(0.0));
            let handle = self.event_loop.after(delay, Task::StepIndicator(step.step));
            self.indicator_timers.push(handle);
        }

        let lookahead = self.scheduler.lookahead();
        self.scheduler_timer = Some(self.event_loop.after(lookahead, Task::SchedulerTick));
    }

    fn cancel_scheduler_timer(&mut self) {
        if let Some(handle) = self.scheduler_timer.take() {
            self.event_loop.cancel(handle);
        }
    }

    fn stop_animation(&mut self) {
        let (width, height) = self.view;
        let frame = self.scope.stop_animation(
            &mut self.event_loop,
            self.engine.analysis_tap(),
            width,
            height,
        );
        self.last_frame = Some(frame);
        info!(transport = ?self.scheduler.transport(), "playback halted");
    }
}

/// Timer interval and commit window from configuration. Values outside
/// 1 ms..=1 s are rejected in favor of the defaults.
fn scheduler_timing(config: &TransportConfig) -> (Duration, f64) {
    let lookahead = match config.lookahead_ms {
        ms if ms.is_finite() && (1.0..=MAX_TIMING_MS).contains(&ms) => {
            Duration::from_secs_f64(ms / 1000.0)
        }
        ms => {
            warn!(lookahead_ms = ms, "invalid configured lookahead, using default");
            DEFAULT_LOOKAHEAD
        }
    };
    let schedule_ahead = match config.schedule_ahead_secs {
        secs if secs.is_finite() && (0.0..=MAX_TIMING_MS / 1000.0).contains(&secs) => secs,
        secs => {
            warn!(schedule_ahead_secs = secs, "invalid configured schedule-ahead, using default");
            DEFAULT_SCHEDULE_AHEAD
        }
    };
    (lookahead, schedule_ahead)
}

const MAX_TIMING_MS: f64 = 1000.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, graph::{AnalysisTap, GraphMessage}, host::ManualClock};

    struct SilentOutput {
        clock: ManualClock,
    }

    impl AudioClock for SilentOutput {
        fn now(&self) -> f64 {
            self.clock.now()
        }
    }

    impl AudioOutput for SilentOutput {
        fn sample_rate(&self) -> f32 {
            48_000.0
        }
        fn dispatch(&mut self, _msg: GraphMessage) -> bool {
            true
        }
        fn tap(&self) -> Option<&AnalysisTap> {
            None
        }
    }

    fn grid(clock: &ManualClock) -> Drumgrid {
        let clock = clock.clone();
        Drumgrid::new(&Config::default(), move || {
            Ok(Box::new(SilentOutput { clock: clock.clone() }) as Box<dyn AudioOutput>)
        })
    }

    #[test]
    fn unusable_timing_config_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            "[transport]\nlookahead_ms = inf\nschedule_ahead_secs = 1e300",
        )
        .unwrap();
        let grid = Drumgrid::new(&config, || Err(Error::AudioUnavailable("no device".into())));
        assert_eq!(grid.scheduler.lookahead(), DEFAULT_LOOKAHEAD);
        assert_eq!(grid.scheduler.schedule_ahead(), DEFAULT_SCHEDULE_AHEAD);

        let config = Config::from_toml_str("[transport]\nlookahead_ms = 40.0").unwrap();
        let grid = Drumgrid::new(&config, || Err(Error::AudioUnavailable("no device".into())));
        assert_eq!(grid.scheduler.lookahead(), Duration::from_millis(40));
    }

    #[test]
    fn start_fails_cleanly_without_audio() {
        let mut grid = Drumgrid::new(&Config::default(), || {
            Err(Error::AudioUnavailable("no device".into()))
        });
        assert!(grid.start().is_err());
        assert_eq!(grid.transport(), Transport::Stopped);
        assert!(grid.next_deadline().is_none());
    }

    #[test]
    fn playhead_follows_indicator_timers() {
        let clock = ManualClock::new();
        let mut grid = grid(&clock);
        grid.start().unwrap();

        // Step 0 is due immediately
        grid.run_timers(0.0);
        assert_eq!(grid.playhead(), Some(0));

        for tick in 1..=6 {
            let now = tick as f64 * 0.025;
            clock.set(now);
            grid.run_timers(now);
        }
        assert_eq!(grid.playhead(), Some(1));
        assert_eq!(
            grid.poll_events(),
            [PlaybackEvent::StepAdvanced(Some(0)), PlaybackEvent::StepAdvanced(Some(1))]
        );
    }

    #[test]
    fn stop_cancels_pending_indicators() {
        let clock = ManualClock::new();
        let mut grid = grid(&clock);
        grid.start().unwrap();
        clock.set(0.05);
        grid.run_timers(0.05);
        grid.poll_events();

        grid.stop();
        assert_eq!(grid.poll_events(), [PlaybackEvent::StepAdvanced(None)]);

        grid.run_timers(10.0);
        assert!(grid.poll_events().is_empty());
        assert_eq!(grid.playhead(), None);
        assert!(grid.next_deadline().is_none());
    }

    #[test]
    fn animation_runs_only_while_playing() {
        let clock = ManualClock::new();
        let mut grid = grid(&clock);
        assert!(grid.display_refresh(80.0, 20.0).is_none());

        grid.start().unwrap();
        assert!(grid.display_refresh(80.0, 20.0).is_some());
        assert!(grid.display_refresh(80.0, 20.0).is_some());

        grid.pause();
        assert!(grid.display_refresh(80.0, 20.0).is_none());
        assert_eq!(grid.waveform().width, 80.0);
    }

    #[test]
    fn unknown_track_volume_is_ignored() {
        let clock = ManualClock::new();
        let mut grid = grid(&clock);
        grid.set_track_volume("cowbell", 0.1);
        grid.set_track_volume("bass", 0.3);
        assert_eq!(grid.track_volume(Instrument::Bass), 0.3);
        assert!(Instrument::ALL
            .into_iter()
            .filter(|&i| i != Instrument::Bass)
            .all(|i| grid.track_volume(i) == 1.0));
    }
}
