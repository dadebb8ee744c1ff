//! Tick sources for driving the per-frame loop.
//!
//! The driver does not care where frame timing comes from. A [`TickSource`]
//! yields wall-clock deltas: [`IntervalTicks`] paces real playback with a
//! tokio interval, [`FixedTicks`] replays a scripted delta sequence so tests
//! and headless tools get deterministic frames.

use tokio::time::{Duration, Interval, MissedTickBehavior, interval};

/// Default driver frequency when none is configured.
pub const DEFAULT_FRAME_HZ: f64 = 60.0;

/// Source of per-frame time deltas (wall-clock seconds).
///
/// Returns `None` when the source is exhausted; an interval source never is.
#[async_trait::async_trait]
pub trait TickSource: Send + 'static {
    /// Wait for the next frame and return its wall-clock delta in seconds.
    async fn next_delta(&mut self) -> Option<f64>;

    /// The nominal frame frequency in Hz.
    fn frame_hz(&self) -> f64;
}

/// Wall-clock frame pacing at a fixed frequency.
pub struct IntervalTicks {
    interval: Interval,
    delta: f64,
    hz: f64,
}

impl IntervalTicks {
    pub fn new(hz: f64) -> Self {
        let hz = if hz > 0.0 { hz } else { DEFAULT_FRAME_HZ };
        let delta = 1.0 / hz;
        let mut interval = interval(Duration::from_secs_f64(delta));
        // Don't burst after a stall; late frames just resume at the cadence.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, delta, hz }
    }
}

impl Default for IntervalTicks {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_HZ)
    }
}

#[async_trait::async_trait]
impl TickSource for IntervalTicks {
    async fn next_delta(&mut self) -> Option<f64> {
        self.interval.tick().await;
        Some(self.delta)
    }

    fn frame_hz(&self) -> f64 {
        self.hz
    }
}

/// Deterministic tick source: yields a fixed list of deltas, then ends.
pub struct FixedTicks {
    deltas: std::vec::IntoIter<f64>,
    hz: f64,
}

impl FixedTicks {
    pub fn new(deltas: Vec<f64>) -> Self {
        Self { deltas: deltas.into_iter(), hz: DEFAULT_FRAME_HZ }
    }

    /// `count` frames of a constant delta.
    pub fn uniform(count: usize, delta: f64) -> Self {
        Self::new(vec![delta; count])
    }
}

#[async_trait::async_trait]
impl TickSource for FixedTicks {
    async fn next_delta(&mut self) -> Option<f64> {
        self.deltas.next()
    }

    fn frame_hz(&self) -> f64 {
        self.hz
    }
}
