//! Timeline indexing: from the flat event log to per-packet sequences.
//!
//! The backend records every packet arrival into one chronological log. For
//! playback each packet needs its own time-sorted sequence, so the index
//! groups events by `(route_idx, packet_id)` and sorts each group by time.
//! Ties on identical `(route_idx, packet_id, time)` keep their original log
//! order (stable sort), which makes the derived sequences reproducible.

use std::collections::BTreeMap;

use crate::{PacketKey, TimelineEvent};

/// Time-sorted event sequence for a single packet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PacketTimeline {
    events: Vec<TimelineEvent>,
}

impl PacketTimeline {
    /// Build from events already belonging to one packet. Sorting is stable,
    /// so equal-time events retain their input order.
    pub fn new(mut events: Vec<TimelineEvent>) -> Self {
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { events }
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First event: the packet's origin, when the sequence is non-empty.
    pub fn origin(&self) -> Option<&TimelineEvent> {
        self.events.first()
    }

    /// Last event: the packet's destination, when the sequence is non-empty.
    pub fn destination(&self) -> Option<&TimelineEvent> {
        self.events.last()
    }
}

/// Per-packet index over the raw timeline.
#[derive(Debug, Clone, Default)]
pub struct TimelineIndex {
    packets: BTreeMap<PacketKey, PacketTimeline>,
    max_time: f64,
}

impl TimelineIndex {
    /// Group a raw event log into per-packet sorted sequences.
    ///
    /// An empty log yields an empty index with a zero horizon, which is a
    /// valid steady state (the clock stays idle).
    pub fn build(timeline: &[TimelineEvent]) -> Self {
        let mut groups: BTreeMap<PacketKey, Vec<TimelineEvent>> = BTreeMap::new();
        let mut max_time = 0.0f64;

        for event in timeline {
            max_time = max_time.max(event.time);
            groups.entry(event.key()).or_default().push(event.clone());
        }

        let packets =
            groups.into_iter().map(|(key, events)| (key, PacketTimeline::new(events))).collect();

        Self { packets, max_time }
    }

    /// Greatest event time across the whole log, `0.0` when empty.
    ///
    /// This is the shared playback horizon: every packet loops against the
    /// same value.
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Number of distinct `(route_idx, packet_id)` groups.
    pub fn packet_count(&self) -> usize {
        self.packets.len()
    }

    pub fn get(&self, key: &PacketKey) -> Option<&PacketTimeline> {
        self.packets.get(key)
    }

    /// All packet sequences in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PacketKey, &PacketTimeline)> {
        self.packets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PacketId;

    fn event(time: f64, route_idx: usize, packet_id: i64, location: &str) -> TimelineEvent {
        TimelineEvent {
            time,
            location: location.to_string(),
            route_idx,
            packet_id: PacketId::Int(packet_id),
            kind: None,
        }
    }

    #[test]
    fn empty_timeline_yields_empty_index() {
        let index = TimelineIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.packet_count(), 0);
        assert_eq!(index.max_time(), 0.0);
    }

    #[test]
    fn interleaved_packets_split_into_sorted_groups() {
        // Two packets on the same route, events interleaved and out of order.
        let log = vec![
            event(30.0, 0, 1, "S0_2"),
            event(10.0, 0, 2, "S0_0"),
            event(0.0, 0, 1, "S0_0"),
            event(40.0, 0, 2, "S0_1"),
            event(15.0, 0, 1, "S0_1"),
        ];

        let index = TimelineIndex::build(&log);
        assert_eq!(index.packet_count(), 2);

        let p1 = index.get(&PacketKey::new(0, 1)).unwrap();
        let times: Vec<f64> = p1.events().iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0.0, 15.0, 30.0]);

        let p2 = index.get(&PacketKey::new(0, 2)).unwrap();
        let times: Vec<f64> = p2.events().iter().map(|e| e.time).collect();
        assert_eq!(times, vec![10.0, 40.0]);

        // No cross-contamination between groups
        assert!(p1.events().iter().all(|e| e.packet_id == PacketId::Int(1)));
        assert!(p2.events().iter().all(|e| e.packet_id == PacketId::Int(2)));
    }

    #[test]
    fn same_packet_id_on_different_routes_stays_separate() {
        let log = vec![event(0.0, 0, 1, "S0_0"), event(5.0, 1, 1, "S1_0")];
        let index = TimelineIndex::build(&log);
        assert_eq!(index.packet_count(), 2);
        assert_eq!(index.get(&PacketKey::new(0, 1)).unwrap().len(), 1);
        assert_eq!(index.get(&PacketKey::new(1, 1)).unwrap().len(), 1);
    }

    #[test]
    fn max_time_tracks_the_latest_event_anywhere() {
        let log = vec![event(12.0, 0, 1, "S0_0"), event(99.5, 1, 0, "S1_0"), event(3.0, 0, 1, "S0_1")];
        assert_eq!(TimelineIndex::build(&log).max_time(), 99.5);
    }

    #[test]
    fn equal_time_ties_keep_log_order() {
        // Duplicate (route, packet, time): stable sort preserves input order.
        let log = vec![event(5.0, 0, 1, "S0_3"), event(5.0, 0, 1, "S0_7"), event(1.0, 0, 1, "S0_0")];
        let index = TimelineIndex::build(&log);
        let events = index.get(&PacketKey::new(0, 1)).unwrap().events();
        assert_eq!(events[0].location, "S0_0");
        assert_eq!(events[1].location, "S0_3");
        assert_eq!(events[2].location, "S0_7");
    }

    #[test]
    fn origin_and_destination_bracket_the_sequence() {
        let log = vec![event(10.0, 0, 1, "S0_1"), event(0.0, 0, 1, "S0_0"), event(20.0, 0, 1, "S0_2")];
        let index = TimelineIndex::build(&log);
        let packet = index.get(&PacketKey::new(0, 1)).unwrap();
        assert_eq!(packet.origin().unwrap().location, "S0_0");
        assert_eq!(packet.destination().unwrap().location, "S0_2");
    }
}
