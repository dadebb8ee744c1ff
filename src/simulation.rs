//! Simulation payload loading.
//!
//! The routing backend answers an upload with one JSON document:
//!
//! ```json
//! {
//!   "routes":   [ { "path": ["S0_1-S0_2"], "color": "#00ff00" } ],
//!   "timeline": [ { "time": 12.5, "location": "S0_2", "route_idx": 0, "packet_id": 3 } ],
//!   "meta":     { "filename": "telemetry.bin", "original_size": 4096, ... }
//! }
//! ```
//!
//! Routes and timeline are immutable once received; every derived structure
//! is a pure function of them. `meta` is pass-through for the consumer's
//! statistics panel.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{PlaybackError, Result, Route, TimelineEvent};

/// Transmission statistics attached by the backend.
///
/// Playback never reads these; they exist for the statistics panel of
/// whatever renders the simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationMeta {
    /// Original upload name; the API layer injects it, so older captures
    /// may lack it.
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub original_size: u64,

    #[serde(default)]
    pub compressed_size: u64,

    #[serde(default)]
    pub total_fragments: u32,

    #[serde(default)]
    pub processing_time_ms: f64,
}

/// One complete simulation result, as received from the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationData {
    #[serde(default)]
    pub routes: Vec<Route>,

    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,

    #[serde(default)]
    pub meta: SimulationMeta,
}

impl SimulationData {
    /// Deserialize a backend payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: SimulationData = serde_json::from_str(json)?;
        info!(
            routes = data.routes.len(),
            events = data.timeline.len(),
            "Parsed simulation payload"
        );
        Ok(data)
    }

    /// Read and deserialize a saved simulation results file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|err| PlaybackError::file_error(path.to_path_buf(), err))?;
        Self::from_json(&json)
    }
}
