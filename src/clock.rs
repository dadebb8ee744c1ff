//! Looping virtual simulation clock.
//!
//! Virtual time runs at a large multiple of wall-clock time (the event log is
//! in simulation milliseconds and whole transmissions finish in a fraction of
//! a second of wall time). When the clock passes the timeline horizon plus a
//! grace period it wraps back to zero, so the animation loops forever.

use serde::{Deserialize, Serialize};

/// Default virtual-time acceleration: one wall-clock second advances the
/// simulation 500 time units.
pub const DEFAULT_SPEED: f64 = 500.0;

/// Grace period past the horizon before wrapping, letting the final segment
/// of the slowest packet play out fully.
pub const DEFAULT_RESET_EPSILON: f64 = 100.0;

/// Time-acceleration multiplier from wall-clock seconds to virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Clamp to a sane range; zero or negative speeds would stall the loop.
    pub fn new(factor: f64) -> Self {
        Self(factor.clamp(0.1, 10_000.0))
    }

    pub fn factor(&self) -> f64 {
        self.0
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

/// Clock state derived from the timeline horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Horizon is positive; the clock advances each frame.
    Running,
    /// Empty timeline; the clock never moves.
    Idle,
}

/// The per-frame clock advance rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackClock {
    pub speed: PlaybackSpeed,
    pub reset_epsilon: f64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self { speed: PlaybackSpeed::default(), reset_epsilon: DEFAULT_RESET_EPSILON }
    }
}

impl PlaybackClock {
    pub fn new(speed: PlaybackSpeed, reset_epsilon: f64) -> Self {
        Self { speed, reset_epsilon }
    }

    /// Clock state for a given horizon.
    pub fn state(max_time: f64) -> ClockState {
        if max_time > 0.0 { ClockState::Running } else { ClockState::Idle }
    }

    /// Advance virtual time by one frame.
    ///
    /// `candidate = previous + delta_seconds * speed`; past
    /// `max_time + reset_epsilon` the clock wraps to zero. An idle clock
    /// (zero horizon) never advances.
    pub fn advance(&self, previous: f64, delta_seconds: f64, max_time: f64) -> f64 {
        if Self::state(max_time) == ClockState::Idle {
            return previous;
        }

        let candidate = previous + delta_seconds * self.speed.factor();
        if candidate > max_time + self.reset_epsilon { 0.0 } else { candidate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_clock_never_exceeds_horizon_plus_grace(
            previous in 0.0f64..200.0,
            delta in 0.0f64..0.1,
            max_time in 1.0f64..1000.0
        ) {
            let clock = PlaybackClock::default();
            let next = clock.advance(previous, delta, max_time);
            prop_assert!(next == 0.0 || next <= (max_time + clock.reset_epsilon).max(previous));
            prop_assert!(next >= 0.0);
        }

        #[test]
        fn prop_idle_clock_never_moves(previous in 0.0f64..1000.0, delta in 0.0f64..10.0) {
            let clock = PlaybackClock::default();
            prop_assert_eq!(clock.advance(previous, delta, 0.0), previous);
        }
    }

    #[test]
    fn advances_by_delta_times_speed() {
        let clock = PlaybackClock::default();
        let next = clock.advance(10.0, 0.016, 1000.0);
        assert!((next - (10.0 + 0.016 * 500.0)).abs() < 1e-9);
    }

    #[test]
    fn wraps_past_horizon_plus_epsilon() {
        // candidate = 150 + 0.2 * 500 = 250 > 100 + 100 -> wrap to 0
        let clock = PlaybackClock::default();
        assert_eq!(clock.advance(150.0, 0.2, 100.0), 0.0);
    }

    #[test]
    fn grace_period_lets_the_last_segment_finish() {
        // candidate = 150 + 0.05 * 500 = 175 <= 200 -> no wrap yet
        let clock = PlaybackClock::default();
        assert_eq!(clock.advance(150.0, 0.05, 100.0), 175.0);
    }

    #[test]
    fn state_matches_horizon() {
        assert_eq!(PlaybackClock::state(0.0), ClockState::Idle);
        assert_eq!(PlaybackClock::state(0.001), ClockState::Running);
    }

    #[test]
    fn speed_clamps_degenerate_factors() {
        assert_eq!(PlaybackSpeed::new(0.0).factor(), 0.1);
        assert_eq!(PlaybackSpeed::new(-5.0).factor(), 0.1);
        assert_eq!(PlaybackSpeed::new(1e9).factor(), 10_000.0);
        assert_eq!(PlaybackSpeed::default().factor(), 500.0);
    }
}
