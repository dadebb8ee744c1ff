//! Subscription rates for frame snapshot delivery

use serde::{Deserialize, Serialize};

/// How often a subscriber wants frame snapshots.
///
/// The driver evaluates frames at its own frequency; a subscription either
/// takes every one of them or caps itself to a lower rate. Snapshots are
/// complete frames, so a capped subscriber skips frames rather than lagging
/// behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameRate {
    /// Every frame the driver publishes.
    Native,

    /// At most this many snapshots per second.
    Max(u32),
}

impl FrameRate {
    /// Collapse caps at or above the driver frequency into [`FrameRate::Native`];
    /// such a cap can never actually drop a frame.
    pub fn normalize(self, driver_hz: f64) -> Self {
        match self {
            FrameRate::Native => FrameRate::Native,
            FrameRate::Max(hz) if hz as f64 >= driver_hz => FrameRate::Native,
            FrameRate::Max(hz) => FrameRate::Max(hz),
        }
    }

    /// Whether this subscription needs a throttle stage in front of it.
    pub fn needs_throttle(self, driver_hz: f64) -> bool {
        match self.normalize(driver_hz) {
            FrameRate::Native => false,
            FrameRate::Max(_) => true,
        }
    }

    /// Minimum spacing between delivered snapshots, for capped rates only.
    pub fn throttle_interval(self, driver_hz: f64) -> Option<std::time::Duration> {
        match self.normalize(driver_hz) {
            FrameRate::Native => None,
            FrameRate::Max(hz) => Some(std::time::Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}
