//! Test utilities: canned simulation payloads
//!
//! Builders for small, fully in-memory simulation inputs used across unit
//! tests and benchmarks. No fixtures on disk; the payloads are tiny enough
//! to construct directly.

#![cfg(any(test, feature = "benchmark"))]

use crate::{
    Link, PacketId, Route, RouteColor, SimulationData, SimulationMeta, TimelineEvent,
};

/// One timeline event with the given coordinates.
pub fn event(time: f64, route_idx: usize, packet_id: i64, location: &str) -> TimelineEvent {
    TimelineEvent {
        time,
        location: location.to_string(),
        route_idx,
        packet_id: PacketId::Int(packet_id),
        kind: None,
    }
}

/// A route over the given `"u-v"` hop strings.
pub fn route(links: &[&str], color: &str) -> Route {
    Route {
        path: links.iter().map(|link| link.parse::<Link>().expect("valid link fixture")).collect(),
        color: RouteColor::Hex(color.to_string()),
        route_id: None,
        strategy: None,
        assigned_packets: None,
        ratio: None,
    }
}

/// A payload with one two-hop route and two staggered packets.
///
/// Horizon is 200 time units; packet 0 runs 0..200, packet 1 runs 50..150.
pub fn two_hop_payload() -> SimulationData {
    SimulationData {
        routes: vec![route(&["S0_0-S0_1", "S0_1-S0_2"], "#00ff00")],
        timeline: vec![
            event(0.0, 0, 0, "S0_0"),
            event(100.0, 0, 0, "S0_1"),
            event(200.0, 0, 0, "S0_2"),
            event(50.0, 0, 1, "S0_0"),
            event(150.0, 0, 1, "S0_1"),
        ],
        meta: SimulationMeta {
            filename: Some("fixture.bin".to_string()),
            original_size: 1024,
            compressed_size: 512,
            total_fragments: 2,
            processing_time_ms: 1.0,
        },
    }
}

/// A payload with `packets` packets hopping across one long route, for
/// benchmark workloads.
pub fn dense_payload(packets: i64, hops: usize) -> SimulationData {
    let hop_strings: Vec<String> =
        (0..hops).map(|i| format!("S0_{}-S0_{}", i % 22, (i + 1) % 22)).collect();
    let hop_refs: Vec<&str> = hop_strings.iter().map(String::as_str).collect();

    let mut timeline = Vec::new();
    for packet_id in 0..packets {
        for (hop, link) in hop_refs.iter().enumerate() {
            let node = link.split('-').next().expect("link has endpoints");
            timeline.push(event(hop as f64 * 10.0 + packet_id as f64, 0, packet_id, node));
        }
    }

    SimulationData {
        routes: vec![route(&hop_refs, "#0000ff")],
        timeline,
        meta: SimulationMeta::default(),
    }
}
