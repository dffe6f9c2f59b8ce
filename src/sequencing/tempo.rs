/*
Tempo and Step Length
=====================

The grid divides each beat into four sixteenth-note steps:

    seconds_per_beat = 60 / bpm
    seconds_per_step = seconds_per_beat × 0.25

    120 BPM → 0.125 s per step → 16 steps = 2.0 s per bar

Tempo is only valid as a positive, finite number. Anything else is refused
at the edge (`Tempo::new` returns None) so the scheduler never divides by
zero or schedules at NaN.
*/

/// Fraction of a beat covered by one step (a sixteenth note).
pub const STEP_FRACTION: f64 = 0.25;

pub const DEFAULT_BPM: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tempo(f64);

impl Tempo {
    /// Returns None for zero, negative, or non-finite BPM.
    pub fn new(bpm: f64) -> Option<Self> {
        (bpm.is_finite() && bpm > 0.0).then_some(Self(bpm))
    }

    pub fn bpm(self) -> f64 {
        self.0
    }

    pub fn seconds_per_step(self) -> f64 {
        seconds_per_step(self.0)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self(DEFAULT_BPM)
    }
}

/// Length of one step at `bpm`. Callers validate `bpm` first.
pub fn seconds_per_step(bpm: f64) -> f64 {
    (60.0 / bpm) * STEP_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_length_at_common_tempos() {
        assert_eq!(seconds_per_step(120.0), 0.125);
        assert_eq!(seconds_per_step(60.0), 0.25);
        assert_eq!(Tempo::default().seconds_per_step(), 0.125);
    }

    #[test]
    fn test_step_length_decreases_with_tempo() {
        let lengths: Vec<f64> = [40.0, 90.0, 120.0, 133.0, 174.0, 300.0]
            .into_iter()
            .map(seconds_per_step)
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_rejects_invalid_bpm() {
        assert!(Tempo::new(0.0).is_none());
        assert!(Tempo::new(-90.0).is_none());
        assert!(Tempo::new(f64::NAN).is_none());
        assert!(Tempo::new(f64::INFINITY).is_none());
        assert_eq!(Tempo::new(133.0).map(Tempo::bpm), Some(133.0));
    }
}
