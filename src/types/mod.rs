//! Core types for the simulation data contract.
//!
//! This module provides the foundational data structures for constellation
//! routing payloads:
//! - [`NodeAddress`] encodes a satellite's `(plane, satellite)` address with
//!   the `"S{plane}_{satellite}"` wire form
//! - [`Link`] is an unordered endpoint pair serialized as `"{u}-{v}"`
//! - [`Route`] is an ordered hop list plus display color
//! - [`TimelineEvent`] records one packet arrival; [`PacketKey`] groups
//!   events into per-packet sequences
//! - [`FrameRate`] controls snapshot stream delivery rates
//!
//! All wire types deserialize directly from the backend JSON with serde;
//! extra backend fields are carried where the consumer wants them and
//! ignored otherwise.

mod event;
mod frame_rate;
mod link;
mod node;
mod route;

pub use event::{EventKind, PacketId, PacketKey, TimelineEvent};
pub use frame_rate::FrameRate;
pub use link::Link;
pub use node::NodeAddress;
pub use route::{Route, RouteColor};
