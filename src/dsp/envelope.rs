/*
Exponential Ramps
=================

Every time-varying parameter in the sound bank (amplitude, oscillator
frequency, filter cutoff) follows the same two-event automation:

    set v0 at τ = 0, then ramp exponentially to v1 at τ = d

For 0 ≤ τ ≤ d the value is

    v(τ) = v0 · (v1 / v0)^(τ / d)

and after τ = d it holds v1.

Why exponential
---------------
Hearing is logarithmic in both loudness and pitch. An exponential ramp
covers equal ratios in equal time, so a decay sounds even all the way down
and a pitch sweep moves through equal musical intervals per millisecond.

  Level
    1.0 ┐╲
        │ ╲
        │  ╲_
        │    ╲__
        │       ╲____
  floor └────────────╲______→ τ
        0            d

The zero problem
----------------
The ratio v1/v0 must be positive: an exponential can approach zero but never
reach it, and a ramp that targets 0.0 is undefined. Targets at or below zero
are clamped to RAMP_FLOOR. The reference recipes already stop at 0.001 or
0.01, so the clamp only guards hand-written curves.

Constant parameters are represented as the degenerate curve with no ramp.
*/

/// Smallest value an exponential ramp may start from or target.
pub const RAMP_FLOOR: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Fixed value for the whole life of the voice.
    Constant(f32),
    /// `from` at τ = 0, exponential approach to `to` at τ = `duration`.
    Exponential { from: f32, to: f32, duration: f32 },
}

impl Curve {
    pub fn constant(value: f32) -> Self {
        Curve::Constant(value)
    }

    /// Build an exponential ramp, clamping non-positive endpoints to the floor.
    pub fn exponential(from: f32, to: f32, duration: f32) -> Self {
        if to <= 0.0 || from <= 0.0 {
            tracing::debug!(from, to, "exponential ramp endpoint clamped to floor");
        }
        Curve::Exponential {
            from: from.max(RAMP_FLOOR),
            to: to.max(RAMP_FLOOR),
            duration: duration.max(0.0),
        }
    }

    /// Value at `tau` seconds after the voice started.
    #[inline]
    pub fn value_at(&self, tau: f64) -> f32 {
        match *self {
            Curve::Constant(value) => value,
            Curve::Exponential { from, to, duration } => {
                if tau <= 0.0 {
                    from
                } else if duration <= 0.0 || tau >= duration as f64 {
                    to
                } else {
                    let progress = (tau / duration as f64) as f32;
                    from * (to / from).powf(progress)
                }
            }
        }
    }

    /// Value once the curve has settled.
    pub fn end_value(&self) -> f32 {
        match *self {
            Curve::Constant(value) => value,
            Curve::Exponential { to, .. } => to,
        }
    }

    /// Fill `buffer` with the curve sampled from `start` at `1/sample_rate` spacing.
    pub fn render(&self, buffer: &mut [f32], start: f64, sample_rate: f32) {
        let dt = 1.0 / sample_rate as f64;
        match *self {
            Curve::Constant(value) => buffer.fill(value),
            Curve::Exponential { .. } => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample = self.value_at(start + i as f64 * dt);
                }
            }
        }
    }
}
