//! Hop interpolation: continuous positions from sparse arrival events.
//!
//! Given one packet's time-sorted event sequence and the current virtual
//! time, find the active segment and linearly interpolate between its two
//! endpoint satellites. The scan runs fresh every frame; segment membership
//! changes arbitrarily as the clock advances and wraps, so no per-frame state
//! survives beyond the simulation time itself.

use glam::DVec3;

use crate::{ConstellationModel, NodeAddress, PacketTimeline, Result};

/// A packet's resolved position within its active segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopSample {
    /// Satellite the packet departed from.
    pub from: NodeAddress,
    /// Satellite the packet is traveling toward.
    pub to: NodeAddress,
    /// Interpolation fraction in `[0, 1)`.
    pub fraction: f64,
    /// Interpolated shell position.
    pub position: DVec3,
}

/// Resolve a packet's position at `simulation_time`.
///
/// Scans for the segment with `events[i].time <= t < events[i+1].time`
/// (inclusive on the left, exclusive on the right). Returns `Ok(None)` when
/// no segment is active: before the first event, at or after the last one,
/// or when the sequence has fewer than two events — the packet is simply not
/// visible then.
///
/// Two consecutive events with equal times form a zero-length segment; the
/// half-open rule skips it, and a segment starting at that shared time
/// reports fraction `0` (the packet holds at the segment's start node rather
/// than dividing by a zero time delta).
///
/// Errors are packet-scoped: a malformed or out-of-range location hides this
/// packet only.
pub fn sample(
    timeline: &PacketTimeline,
    model: &ConstellationModel,
    simulation_time: f64,
) -> Result<Option<HopSample>> {
    let events = timeline.events();

    for pair in events.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if simulation_time < current.time || simulation_time >= next.time {
            continue;
        }

        let from: NodeAddress = current.location.parse()?;
        let to: NodeAddress = next.location.parse()?;
        let start = model.resolve(from)?;
        let end = model.resolve(to)?;

        let time_delta = next.time - current.time;
        let fraction =
            if time_delta > 0.0 { (simulation_time - current.time) / time_delta } else { 0.0 };

        return Ok(Some(HopSample { from, to, fraction, position: start.lerp(end, fraction) }));
    }

    Ok(None)
}
