//! Frame snapshot types for the stream-based architecture

use glam::DVec3;

use crate::{NodeAddress, PacketKey, RouteColor};

/// One visible packet's state within a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketState {
    /// Which packet this is.
    pub key: PacketKey,

    /// Route the packet travels, for line/packet color pairing.
    pub route_idx: usize,

    /// Display color inherited from the route.
    pub color: RouteColor,

    /// Interpolated shell position.
    pub position: DVec3,

    /// Segment start satellite.
    pub from: NodeAddress,

    /// Segment end satellite.
    pub to: NodeAddress,

    /// Progress along the segment in `[0, 1)`.
    pub fraction: f64,
}

/// One evaluated frame of the playback.
///
/// This is the fundamental data unit that flows to consumers: everything a
/// renderer needs to place every visible packet for one frame. Static
/// geometry lives in [`crate::SceneLayout`] and is not repeated here.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Input generation this frame was evaluated against.
    pub revision: u64,

    /// Virtual time the frame was evaluated at.
    pub simulation_time: f64,

    /// Visible packets only; hidden and faulted packets are absent.
    pub packets: Vec<PacketState>,
}

impl FrameSnapshot {
    /// Look up one packet's state in this frame.
    pub fn packet(&self, key: &PacketKey) -> Option<&PacketState> {
        self.packets.iter().find(|packet| &packet.key == key)
    }
}
