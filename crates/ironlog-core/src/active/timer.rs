//! Rest timer countdown between sets.

use serde::{Deserialize, Serialize};

/// Rest period used when the plan exercise does not specify one.
pub const DEFAULT_REST_SECONDS: u32 = 90;

/// A pausable rest countdown tied to the set whose completion
/// triggered it.
///
/// The timer holds no clock of its own; it is advanced by an external
/// per-second tick while `is_running`. Adjustments clamp the remaining
/// time at zero and leave `initial_seconds` untouched so progress can
/// still be computed against the original duration. There is no upper
/// clamp: the user may extend rest indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestTimer {
    /// Seconds left on the countdown
    pub remaining_seconds: u32,
    /// Duration the countdown started from
    pub initial_seconds: u32,
    /// Whether ticks currently advance the countdown
    pub is_running: bool,
    /// The set whose completion started this timer
    pub triggered_by_set_id: i64,
}

impl RestTimer {
    /// Creates a running timer for the given duration.
    pub fn new(set_id: i64, duration_seconds: u32) -> Self {
        Self {
            remaining_seconds: duration_seconds,
            initial_seconds: duration_seconds,
            is_running: true,
            triggered_by_set_id: set_id,
        }
    }

    /// Elapsed fraction of the original duration, for progress bars.
    /// Clamped to `0.0..=1.0` (extending rest past the original
    /// duration reads as no progress, not negative progress).
    pub fn progress(&self) -> f64 {
        if self.initial_seconds == 0 {
            return 1.0;
        }
        let elapsed = f64::from(self.initial_seconds) - f64::from(self.remaining_seconds);
        (elapsed / f64::from(self.initial_seconds)).clamp(0.0, 1.0)
    }

    /// Adds (or subtracts) seconds, never going below zero.
    pub fn adjust(&mut self, delta_seconds: i64) {
        let adjusted = i64::from(self.remaining_seconds) + delta_seconds;
        self.remaining_seconds = adjusted.max(0) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_clamps_at_zero() {
        let mut timer = RestTimer::new(1, 20);
        timer.adjust(-9999);
        assert_eq!(timer.remaining_seconds, 0);
    }

    #[test]
    fn adjust_has_no_upper_clamp_and_preserves_initial() {
        let mut timer = RestTimer::new(1, 90);
        timer.adjust(300);
        assert_eq!(timer.remaining_seconds, 390);
        assert_eq!(timer.initial_seconds, 90);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut timer = RestTimer::new(1, 100);
        assert_eq!(timer.progress(), 0.0);
        timer.remaining_seconds = 25;
        assert_eq!(timer.progress(), 0.75);
        timer.remaining_seconds = 0;
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn progress_clamps_when_rest_was_extended() {
        let mut timer = RestTimer::new(1, 60);
        timer.adjust(60);
        assert_eq!(timer.progress(), 0.0);
    }
}
