//! The playback engine: one coordinated per-frame tick for all packets.
//!
//! `Playback` owns the immutable simulation input, the derived caches
//! (timeline index, static scene layout), and the single mutable scalar of
//! the whole system: the virtual simulation time. Each call to
//! [`Playback::tick`] advances the clock exactly once and then evaluates
//! every packet against that same time value, so all positions within one
//! frame are mutually consistent.
//!
//! Derived structures are rebuilt only when new input is loaded; the
//! `revision` stamp on every snapshot tells consumers which input generation
//! it came from.

use std::collections::BTreeSet;
use std::sync::Arc;

use glam::DVec3;
use tracing::{debug, info, trace, warn};

use crate::{
    ConstellationConfig, ConstellationModel, FrameSnapshot, PacketKey, PacketState, PlaybackClock,
    PlaybackSpeed, Result, RouteColor, SceneLayout, SimulationData, SimulationMeta, TimelineIndex,
    interpolate,
};

/// Playback engine for one loaded simulation.
pub struct Playback {
    data: SimulationData,
    model: ConstellationModel,
    clock: PlaybackClock,

    // Derived caches, rebuilt on load only.
    index: TimelineIndex,
    layout: Arc<SceneLayout>,

    /// Packets hidden for the rest of this input generation because their
    /// timeline referenced a malformed or unplaceable node.
    faulted: BTreeSet<PacketKey>,

    simulation_time: f64,
    revision: u64,
}

impl Playback {
    /// Build an engine from a parsed payload and constellation configuration.
    pub fn new(data: SimulationData, config: ConstellationConfig) -> Result<Self> {
        let model = ConstellationModel::new(config)?;
        let mut playback = Self {
            data: SimulationData::default(),
            model,
            clock: PlaybackClock::default(),
            index: TimelineIndex::default(),
            layout: Arc::new(SceneLayout::default()),
            faulted: BTreeSet::new(),
            simulation_time: 0.0,
            revision: 0,
        };
        playback.load(data);
        Ok(playback)
    }

    /// Replace the simulation input, rebuilding every derived structure and
    /// resetting the clock to zero.
    pub fn load(&mut self, data: SimulationData) {
        self.data = data;
        self.revision += 1;
        self.simulation_time = 0.0;
        self.faulted.clear();

        self.index = TimelineIndex::build(&self.data.timeline);
        self.layout = Arc::new(SceneLayout::build(&self.data.routes, &self.model));

        // Events pointing at a route the payload never defined can't be
        // colored or attributed; fault those packets up front.
        let route_count = self.data.routes.len();
        for (key, _) in self.index.iter() {
            if key.route_idx >= route_count {
                warn!(packet = %key, route_count, "Faulting packet with out-of-range route index");
                self.faulted.insert(key.clone());
            }
        }

        info!(
            revision = self.revision,
            routes = route_count,
            packets = self.index.packet_count(),
            max_time = self.index.max_time(),
            "Loaded simulation input"
        );
    }

    /// Advance one frame and evaluate every packet at the new time.
    pub fn tick(&mut self, delta_seconds: f64) -> Arc<FrameSnapshot> {
        self.simulation_time =
            self.clock.advance(self.simulation_time, delta_seconds, self.index.max_time());

        let mut packets = Vec::new();
        let mut newly_faulted = Vec::new();

        for (key, timeline) in self.index.iter() {
            if self.faulted.contains(key) {
                continue;
            }

            match interpolate::sample(timeline, &self.model, self.simulation_time) {
                Ok(Some(hop)) => packets.push(PacketState {
                    key: key.clone(),
                    route_idx: key.route_idx,
                    color: self.route_color(key.route_idx),
                    position: hop.position,
                    from: hop.from,
                    to: hop.to,
                    fraction: hop.fraction,
                }),
                Ok(None) => {}
                Err(err) => {
                    // Packet-scoped by construction; hide this packet and
                    // keep the rest of the frame intact.
                    warn!(packet = %key, error = %err, "Hiding packet after interpolation error");
                    newly_faulted.push(key.clone());
                }
            }
        }

        for key in newly_faulted {
            self.faulted.insert(key);
        }

        trace!(
            time = self.simulation_time,
            visible = packets.len(),
            "Frame evaluated"
        );

        Arc::new(FrameSnapshot {
            revision: self.revision,
            simulation_time: self.simulation_time,
            packets,
        })
    }

    fn route_color(&self, route_idx: usize) -> RouteColor {
        self.data.routes.get(route_idx).map(|route| route.color.clone()).unwrap_or_default()
    }

    /// Static geometry for the current input generation.
    pub fn scene(&self) -> Arc<SceneLayout> {
        Arc::clone(&self.layout)
    }

    /// Backend transmission statistics, pass-through for the consumer.
    pub fn meta(&self) -> &SimulationMeta {
        &self.data.meta
    }

    /// Shared playback horizon: the greatest event time in the input.
    pub fn max_time(&self) -> f64 {
        self.index.max_time()
    }

    /// Current virtual time.
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Input generation stamp; bumped on every [`Playback::load`].
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of packets in the current input, faulted ones included.
    pub fn packet_count(&self) -> usize {
        self.index.packet_count()
    }

    /// Adjust the time-acceleration multiplier.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.clock.speed = speed;
        debug!(factor = speed.factor(), "Playback speed set");
    }

    /// Satellite position lookup used by consumers placing extra geometry.
    pub fn position_of(&self, plane: u32, satellite: u32) -> DVec3 {
        self.model.position(plane, satellite)
    }
}
