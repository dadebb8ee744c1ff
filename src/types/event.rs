//! Timeline events: the sparse per-packet movement record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Packet identifier, unique within one route.
///
/// The backend emits integers today, but the contract allows strings, so
/// both deserialize. Ordering is total (integers before strings) to keep
/// derived maps deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PacketId {
    Int(i64),
    Text(String),
}

impl From<i64> for PacketId {
    fn from(id: i64) -> Self {
        PacketId::Int(id)
    }
}

impl From<&str> for PacketId {
    fn from(id: &str) -> Self {
        PacketId::Text(id.to_string())
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketId::Int(id) => write!(f, "{id}"),
            PacketId::Text(id) => f.write_str(id),
        }
    }
}

/// Grouping key for one packet's event sequence: `(route_idx, packet_id)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PacketKey {
    pub route_idx: usize,
    pub packet_id: PacketId,
}

impl PacketKey {
    pub fn new(route_idx: usize, packet_id: impl Into<PacketId>) -> Self {
        Self { route_idx, packet_id: packet_id.into() }
    }
}

impl fmt::Display for PacketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route {} packet {}", self.route_idx, self.packet_id)
    }
}

/// Event classification emitted by the backend simulator.
///
/// Informational only; playback treats every event as "the packet reached
/// `location` at `time`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    PacketStart,
    PacketHop,
}

/// One recorded fact: packet `packet_id` on route `route_idx` arrived at
/// `location` at virtual time `time` (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Arrival time in simulation milliseconds. Non-negative.
    pub time: f64,

    /// Raw node id token for the satellite the packet reached.
    ///
    /// Kept unparsed on purpose: a malformed id must hide only the affected
    /// packet at interpolation time, not reject the whole payload at load.
    pub location: String,

    /// Index into the payload's `routes` array.
    pub route_idx: usize,

    /// Packet identifier, unique within the route.
    pub packet_id: PacketId,

    /// Backend event classification, when present.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
}

impl TimelineEvent {
    /// Grouping key for this event.
    pub fn key(&self) -> PacketKey {
        PacketKey { route_idx: self.route_idx, packet_id: self.packet_id.clone() }
    }
}
