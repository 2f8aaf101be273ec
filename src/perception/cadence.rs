//! Fixed-interval scheduling for the visibility check.
//!
//! The check is a second cooperative task sharing the frame loop: it fires on
//! the first poll after start, then whenever the repeating timer completes.
//! A frame longer than the interval still fires only once, so a hitch never
//! produces a burst of ray casts.

use std::time::Duration;

use bevy::time::{Timer, TimerMode};

/// Converts `secs` to a [`Duration`] rounded to the nearest microsecond.
///
/// `f32` seconds such as `0.2` or `0.04` are not exact, and converting them
/// directly lands a few nanoseconds off the intended value. Negative or
/// non-finite input yields [`Duration::ZERO`].
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "input is finite, positive, and rounded before the cast"
)]
pub fn duration_from_secs(secs: f32) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::ZERO;
    }
    let micros = (f64::from(secs) * 1_000_000.0).round();
    Duration::from_micros(micros as u64)
}

/// Repeating timer gating the detection check.
#[derive(Debug, Clone)]
pub struct DetectionCadence {
    timer: Timer,
    primed: bool,
    stopped: bool,
}

impl DetectionCadence {
    /// A cadence firing every `interval_secs`, with the first check due
    /// immediately.
    #[must_use]
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::new(duration_from_secs(interval_secs), TimerMode::Repeating),
            primed: true,
            stopped: false,
        }
    }

    /// Advances the cadence by `delta` and reports whether a check is due.
    pub fn poll(&mut self, delta: Duration) -> bool {
        if self.stopped {
            return false;
        }
        if self.primed {
            self.primed = false;
            return true;
        }
        self.timer.tick(delta);
        self.timer.just_finished()
    }

    /// Cancels all further checks.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether [`Self::stop`] has been called.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}
