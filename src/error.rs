//! Error types for simulation playback.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context for debugging.
//!
//! ## Error Categories
//!
//! - **Address Errors**: node id or link strings that violate the wire grammar
//! - **Range Errors**: addresses or route indices outside the loaded data
//! - **File Errors**: problems reading a simulation results file
//! - **Json Errors**: payloads that do not match the data contract
//! - **Config Errors**: degenerate constellation configuration
//!
//! ## Packet Scope
//!
//! A malformed location string must abort only the affected packet's
//! rendering, never the whole playback loop. The engine uses
//! [`PlaybackError::is_packet_scoped`] to decide between skipping one packet
//! and failing the load:
//!
//! ```rust
//! use skyroute::PlaybackError;
//!
//! let error = PlaybackError::malformed_node_id("X0_1", "missing 'S' prefix");
//! assert!(error.is_packet_scoped());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for playback operations.
pub type Result<T, E = PlaybackError> = std::result::Result<T, E>;

/// Main error type for playback operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("Malformed node id '{token}': {details}")]
    MalformedNodeId { token: String, details: String },

    #[error("Malformed link '{token}': expected '{{u}}-{{v}}'")]
    MalformedLink { token: String },

    #[error("Node {node} outside constellation ({planes} planes x {sats_per_plane} satellites)")]
    NodeOutOfRange { node: String, planes: u32, sats_per_plane: u32 },

    #[error("Event references route {index} but only {route_count} routes are defined")]
    RouteIndex { index: usize, route_count: usize },

    #[error("Simulation file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Simulation payload does not match the data contract")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid constellation configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl PlaybackError {
    /// Returns whether this error affects a single packet's rendering only.
    ///
    /// Packet-scoped errors hide the offending packet and leave the rest of
    /// the playback (other packets, the static mesh) untouched. Everything
    /// else is a data-contract or configuration failure that rejects the
    /// whole input.
    pub fn is_packet_scoped(&self) -> bool {
        match self {
            PlaybackError::MalformedNodeId { .. } => true,
            PlaybackError::NodeOutOfRange { .. } => true,
            PlaybackError::RouteIndex { .. } => true,
            PlaybackError::MalformedLink { .. } => false,
            PlaybackError::File { .. } => false,
            PlaybackError::Json { .. } => false,
            PlaybackError::InvalidConfig { .. } => false,
        }
    }

    /// Helper constructor for malformed node id errors.
    pub fn malformed_node_id(token: impl Into<String>, details: impl Into<String>) -> Self {
        PlaybackError::MalformedNodeId { token: token.into(), details: details.into() }
    }

    /// Helper constructor for malformed link errors.
    pub fn malformed_link(token: impl Into<String>) -> Self {
        PlaybackError::MalformedLink { token: token.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PlaybackError::File { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        PlaybackError::InvalidConfig { reason: reason.into() }
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        PlaybackError::Json { source: err }
    }
}

impl From<std::io::Error> for PlaybackError {
    fn from(err: std::io::Error) -> Self {
        PlaybackError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_contain_their_context(
                token in "[a-zA-Z0-9_#]{1,16}",
                details in "[a-zA-Z ]{1,32}",
                index in 0usize..1000,
                route_count in 0usize..1000
            ) {
                let node_err = PlaybackError::malformed_node_id(token.clone(), details.clone());
                let msg = node_err.to_string();
                prop_assert!(msg.contains(&token));
                prop_assert!(msg.contains(&details));

                let link_err = PlaybackError::malformed_link(token.clone());
                prop_assert!(link_err.to_string().contains(&token));

                let route_err = PlaybackError::RouteIndex { index, route_count };
                let msg = route_err.to_string();
                prop_assert!(msg.contains(&index.to_string()));
                prop_assert!(msg.contains(&route_count.to_string()));
            }

            #[test]
            fn packet_scope_never_spans_load_failures(reason in ".{0,32}") {
                // Contract-boundary failures must reject the whole input.
                let config_err = PlaybackError::invalid_config(reason.clone());
                prop_assert!(!config_err.is_packet_scoped());

                let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, reason);
                let file_err: PlaybackError = io_err.into();
                prop_assert!(!file_err.is_packet_scoped());
            }
        }
    }

    #[test]
    fn error_constructors_validation() {
        let file_error = PlaybackError::file_error(
            PathBuf::from("/test"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(file_error, PlaybackError::File { .. }));

        let node_error = PlaybackError::malformed_node_id("Q1_2", "missing prefix");
        assert!(matches!(node_error, PlaybackError::MalformedNodeId { .. }));

        let link_error = PlaybackError::malformed_link("S0_1");
        assert!(matches!(link_error, PlaybackError::MalformedLink { .. }));
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: PlaybackError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<PlaybackError>();

        let error = PlaybackError::malformed_node_id("bogus", "test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn packet_scoped_classification() {
        assert!(PlaybackError::malformed_node_id("bogus", "test").is_packet_scoped());
        assert!(
            PlaybackError::NodeOutOfRange { node: "S9_0".into(), planes: 3, sats_per_plane: 22 }
                .is_packet_scoped()
        );
        assert!(PlaybackError::RouteIndex { index: 4, route_count: 2 }.is_packet_scoped());
        assert!(!PlaybackError::invalid_config("zero planes").is_packet_scoped());
    }

    #[test]
    fn from_conversions_work() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
        let playback_err: PlaybackError = io_err.into();

        match playback_err {
            PlaybackError::File { source, .. } => {
                assert_eq!(source.to_string(), "test file");
            }
            _ => panic!("Expected File error variant"),
        }

        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let playback_err: PlaybackError = json_err.into();
        assert!(matches!(playback_err, PlaybackError::Json { .. }));
    }
}
