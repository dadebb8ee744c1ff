//! Type-safe playback engine for satellite-network routing simulations.
//!
//! Skyroute replays the output of a constellation routing simulator: static
//! orbital geometry for every satellite, per-route polylines, and smooth
//! per-frame packet positions interpolated from sparse hop events.
//!
//! # Features
//!
//! - **Deterministic geometry**: `(plane, satellite)` to shell position is
//!   pure math over the constellation configuration
//! - **Timeline playback**: sparse arrival events become continuous motion
//!   on a looping virtual clock
//! - **Fault isolation**: a malformed node id hides one packet, never the
//!   whole scene
//! - **Stream delivery**: frame snapshots over async streams at native or
//!   throttled rates
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use skyroute::{FrameRate, Skyroute};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Skyroute::open("simulation_results.json").await?;
//!     let mut frames = session.subscribe(FrameRate::Native);
//!
//!     while let Some(frame) = frames.next().await {
//!         for packet in &frame.packets {
//!             println!("{} at {:?}", packet.key, packet.position);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Geometry and timeline algorithms
pub mod clock;
pub mod constellation;
pub mod interpolate;
pub mod scene;
pub mod timeline;

// Engine and stream-based delivery
pub mod driver;
pub mod playback;
pub mod session;
pub mod simulation;
pub mod snapshot;
pub mod stream;
pub mod ticks;

// Core exports
pub use error::*;
pub use types::*;

// Algorithm exports
pub use clock::{ClockState, DEFAULT_RESET_EPSILON, DEFAULT_SPEED, PlaybackClock, PlaybackSpeed};
pub use constellation::{ConstellationConfig, ConstellationModel};
pub use interpolate::HopSample;
pub use scene::{RoutePolyline, SatellitePoint, SceneLayout};
pub use timeline::{PacketTimeline, TimelineIndex};

// Engine exports
pub use playback::Playback;
pub use simulation::{SimulationData, SimulationMeta};
pub use snapshot::{FrameSnapshot, PacketState};

// Delivery exports
pub use driver::{Driver, DriverChannels};
pub use session::ReplaySession;
pub use ticks::{DEFAULT_FRAME_HZ, FixedTicks, IntervalTicks, TickSource};

/// Unified entry point for playback sessions.
///
/// Loads a simulation results payload, builds the engine with the default
/// constellation configuration, and starts a wall-clock driver at 60Hz.
///
/// # Examples
///
/// ```rust,no_run
/// use skyroute::Skyroute;
///
/// #[tokio::main]
/// async fn main() -> skyroute::Result<()> {
///     let session = Skyroute::open("simulation_results.json").await?;
///     println!("{} satellites", session.scene().satellites.len());
///     Ok(())
/// }
/// ```
pub struct Skyroute;

impl Skyroute {
    /// Open a saved simulation results file and start playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the payload does not
    /// match the data contract, or the configuration is degenerate.
    pub async fn open<P: AsRef<std::path::Path>>(path: P) -> Result<ReplaySession> {
        let data = SimulationData::from_file(path)?;
        Self::start(data, ConstellationConfig::default(), DEFAULT_FRAME_HZ).await
    }

    /// Start playback from an in-memory JSON payload.
    pub async fn from_json(json: &str) -> Result<ReplaySession> {
        let data = SimulationData::from_json(json)?;
        Self::start(data, ConstellationConfig::default(), DEFAULT_FRAME_HZ).await
    }

    /// Start playback with explicit configuration and driver frequency.
    pub async fn start(
        data: SimulationData,
        config: ConstellationConfig,
        frame_hz: f64,
    ) -> Result<ReplaySession> {
        let playback = Playback::new(data, config)?;
        Ok(ReplaySession::start_paced(playback, frame_hz).await)
    }
}
