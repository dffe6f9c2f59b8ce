/*
Pattern Store
=============

The grid is one row per track, sixteen steps per row:

              0 1 2 3 4 5 6 7 8 9 A B C D E F
    kick      x . . . x . . . x . . . x . . .
    snare     . . . . x . . . . . . . x . . .
    hihat     x . x . x . x . x . x . x . x .
    ...

Rows are fixed-size arrays, so a track can never hold more or fewer than
sixteen steps. Everything arriving from outside (track ids as strings, step
indices, bulk loads) is validated at this boundary; invalid input is a
logged no-op, never an error.

Exchange format
---------------
Bulk loads and snapshots use an ordered list of `TrackPattern { id, steps }`,
which serializes naturally through serde:

    [{ "id": "kick", "steps": [true, false, ...] }, ...]
*/

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{voices::Instrument, STEPS};

pub type Steps = [bool; STEPS];

/// One track's row in the exchange format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPattern {
    pub id: String,
    pub steps: Vec<bool>,
}

impl TrackPattern {
    pub fn new(id: impl Into<String>, steps: impl Into<Vec<bool>>) -> Self {
        Self {
            id: id.into(),
            steps: steps.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternStore {
    rows: [Steps; Instrument::ALL.len()],
}

impl PatternStore {
    /// Every track, every step off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one step and return its new state. Unknown ids and indices
    /// outside the row leave the store untouched and return false.
    pub fn toggle_step(&mut self, track_id: &str, index: usize) -> bool {
        let Some(step) = self.step_mut(track_id, index) else {
            return false;
        };
        *step = !*step;
        *step
    }

    pub fn set_step(&mut self, instrument: Instrument, index: usize, active: bool) {
        match self.rows[instrument.index()].get_mut(index) {
            Some(step) => *step = active,
            None => warn!(track = %instrument, index, "step index out of range"),
        }
    }

    pub fn is_active(&self, instrument: Instrument, index: usize) -> bool {
        self.rows[instrument.index()]
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    pub fn track(&self, instrument: Instrument) -> &Steps {
        &self.rows[instrument.index()]
    }

    /// Instruments with `index` active, in declaration order.
    pub fn active_at(&self, index: usize) -> impl Iterator<Item = Instrument> + '_ {
        Instrument::ALL
            .into_iter()
            .filter(move |&instrument| self.is_active(instrument, index))
    }

    /// Replace the rows named in `data`. Tracks not mentioned keep their
    /// steps; malformed entries are skipped.
    pub fn load_pattern(&mut self, data: &[TrackPattern]) {
        for entry in data {
            let Ok(instrument) = entry.id.parse::<Instrument>() else {
                warn!(id = %entry.id, "skipping pattern entry for unknown track");
                continue;
            };
            let Ok(steps) = Steps::try_from(entry.steps.as_slice()) else {
                warn!(
                    id = %entry.id,
                    len = entry.steps.len(),
                    "skipping pattern entry with wrong step count"
                );
                continue;
            };
            self.rows[instrument.index()] = steps;
        }
    }

    pub fn clear_pattern(&mut self) {
        self.rows = [[false; STEPS]; Instrument::ALL.len()];
    }

    /// Independent copy of every row, in declaration order.
    pub fn pattern_data(&self) -> Vec<TrackPattern> {
        Instrument::ALL
            .into_iter()
            .map(|instrument| TrackPattern::new(instrument.as_str(), self.track(instrument).to_vec()))
            .collect()
    }

    fn step_mut(&mut self, track_id: &str, index: usize) -> Option<&mut bool> {
        let Ok(instrument) = track_id.parse::<Instrument>() else {
            warn!(id = track_id, "toggle on unknown track ignored");
            return None;
        };
        let step = self.rows[instrument.index()].get_mut(index);
        if step.is_none() {
            warn!(id = track_id, index, "toggle on out-of-range step ignored");
        }
        step
    }
}

/// Four-on-the-floor kick, backbeat snare, eighth-note hats.
pub fn demo_pattern() -> Vec<TrackPattern> {
    let kick: Vec<bool> = (0..STEPS).map(|i| i % 4 == 0).collect();
    let snare: Vec<bool> = (0..STEPS).map(|i| i == 4 || i == 12).collect();
    let hihat: Vec<bool> = (0..STEPS).map(|i| i % 2 == 0).collect();

    vec![
        TrackPattern::new("kick", kick),
        TrackPattern::new("snare", snare),
        TrackPattern::new("hihat", hihat),
    ]
}
