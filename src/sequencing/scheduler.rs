/*
Lookahead Scheduler
===================

Timers on the control side are coarse and jittery; the audio clock is
sample-accurate. The scheduler bridges the two by waking often and committing
a little way into the future:

    every lookahead (25 ms):
        while next_step_time < now + schedule_ahead (100 ms):
            advance the step, trigger its sounds at next_step_time, move on

  audio time ─────────────────────────────────────────────────→
               now          now + schedule_ahead
                │◄──────────────────►│
        ... ────┼──●────────●────────┼──○──── ...
                   committed steps      not yet

Each sound is handed to the audio side with an absolute timestamp, so timer
jitter only changes *when* a step is committed, never *where* it sounds.

Drift-free cursor
-----------------
Repeated `t += step` accumulates rounding error over thousands of steps. The
cursor is instead

    next_step_time = anchor + steps_since_anchor × seconds_per_step

with a fresh anchor whenever the tempo changes. Already committed steps keep
their times; only the spacing after the pending step changes.

Stalls
------
If the host stops calling us for a while, the pending step can fall far
behind the clock. Steps more than one lookahead quantum late are skipped
(the index still advances) rather than fired in a burst.
*/

use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    pattern::PatternStore,
    tempo::Tempo,
};
use crate::{voices::Instrument, STEPS};

pub const DEFAULT_LOOKAHEAD: Duration = Duration::from_millis(25);
pub const DEFAULT_SCHEDULE_AHEAD: f64 = 0.1;

/// Destination for step triggers: play `instrument` at absolute audio time `at`.
pub trait SoundTrigger {
    fn trigger(&mut self, instrument: Instrument, at: f64);
}

/// Records triggers instead of playing them.
impl SoundTrigger for Vec<(Instrument, f64)> {
    fn trigger(&mut self, instrument: Instrument, at: f64) {
        self.push((instrument, at));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// A step committed during one scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledStep {
    pub step: usize,
    pub time: f64,
}

pub struct Scheduler {
    tempo: Tempo,
    transport: Transport,
    /// Last committed step; None until the first advance after a stop.
    current_step: Option<usize>,
    anchor_time: f64,
    steps_since_anchor: u64,
    lookahead: Duration,
    schedule_ahead: f64,
}

impl Scheduler {
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            transport: Transport::Stopped,
            current_step: None,
            anchor_time: 0.0,
            steps_since_anchor: 0,
            lookahead: DEFAULT_LOOKAHEAD,
            schedule_ahead: DEFAULT_SCHEDULE_AHEAD,
        }
    }

    pub fn with_timing(mut self, lookahead: Duration, schedule_ahead: f64) -> Self {
        self.lookahead = lookahead;
        self.schedule_ahead = schedule_ahead.max(0.0);
        self
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_running(&self) -> bool {
        self.transport == Transport::Running
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    pub fn schedule_ahead(&self) -> f64 {
        self.schedule_ahead
    }

    /// Audio time at which the pending step will sound.
    pub fn next_step_time(&self) -> f64 {
        self.anchor_time + self.steps_since_anchor as f64 * self.tempo.seconds_per_step()
    }

    /// Begin playback from the top with step 0 at `now`, whether stopped or
    /// paused. Returns false if already running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.transport == Transport::Running {
            return false;
        }

        self.current_step = None;
        self.anchor_time = now;
        self.steps_since_anchor = 0;
        self.transport = Transport::Running;
        info!(bpm = self.tempo.bpm(), "transport started");
        true
    }

    /// Stop emitting triggers. The step position is held until the next
    /// start.
    pub fn pause(&mut self) -> bool {
        if self.transport != Transport::Running {
            return false;
        }
        self.transport = Transport::Paused;
        info!(step = ?self.current_step, "transport paused");
        true
    }

    /// Halt and rewind. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.transport == Transport::Stopped {
            return false;
        }
        self.transport = Transport::Stopped;
        self.current_step = None;
        info!("transport stopped");
        true
    }

    /// Change the spacing of future steps. Invalid values are ignored.
    pub fn set_tempo(&mut self, bpm: f64) -> bool {
        let Some(tempo) = Tempo::new(bpm) else {
            warn!(bpm, "ignoring invalid tempo");
            return false;
        };

        // Re-anchor on the pending step so it keeps the time it was given
        self.anchor_time = self.next_step_time();
        self.steps_since_anchor = 0;
        self.tempo = tempo;
        debug!(bpm, "tempo changed");
        true
    }

    /// One scheduling pass. Commits every step due before
    /// `now + schedule_ahead` and triggers its active tracks.
    pub fn run(
        &mut self,
        now: f64,
        pattern: &PatternStore,
        sink: &mut impl SoundTrigger,
    ) -> Vec<ScheduledStep> {
        let mut committed = Vec::new();
        if !self.is_running() {
            return committed;
        }

        self.skip_stalled_steps(now);

        while self.next_step_time() < now + self.schedule_ahead {
            let step = self.advance_step();
            let time = self.next_step_time();

            for instrument in pattern.active_at(step) {
                sink.trigger(instrument, time);
            }
            debug!(step, time, "step scheduled");

            committed.push(ScheduledStep { step, time });
            self.steps_since_anchor += 1;
        }

        committed
    }

    fn advance_step(&mut self) -> usize {
        let step = self.current_step.map_or(0, |step| (step + 1) % STEPS);
        self.current_step = Some(step);
        step
    }

    fn skip_stalled_steps(&mut self, now: f64) {
        let quantum = self.lookahead.as_secs_f64();
        let mut skipped = 0usize;
        while self.next_step_time() < now - quantum {
            self.advance_step();
            self.steps_since_anchor += 1;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, now, "scheduler stalled, skipped late steps");
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}
