//! Node addressing for constellation satellites.
//!
//! Every satellite is addressed by its orbital plane and its slot within
//! that plane. The wire format is the fixed-prefix textual form
//! `"S{plane}_{satellite}"`, e.g. `"S0_5"` for plane 0, satellite 5.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PlaybackError, Result};

/// Leading tag of the textual node id form.
const NODE_PREFIX: char = 'S';

/// Separator between the plane and satellite fields.
const NODE_SEPARATOR: char = '_';

/// Address of a single satellite: `(plane, satellite-within-plane)`.
///
/// `Ord` follows `(plane, satellite)` so collections keyed by address iterate
/// in a stable, predictable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeAddress {
    /// Orbital plane index.
    pub plane: u32,
    /// Satellite slot within the plane.
    pub satellite: u32,
}

impl NodeAddress {
    /// Create an address from raw plane and satellite indices.
    pub fn new(plane: u32, satellite: u32) -> Self {
        Self { plane, satellite }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", NODE_PREFIX, self.plane, NODE_SEPARATOR, self.satellite)
    }
}

impl FromStr for NodeAddress {
    type Err = PlaybackError;

    /// Parse the canonical `"S{plane}_{satellite}"` form.
    ///
    /// Both fields must be plain non-negative integers. Leading zeros are
    /// accepted (the backend never emits them, but nothing in the contract
    /// forbids them).
    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .strip_prefix(NODE_PREFIX)
            .ok_or_else(|| PlaybackError::malformed_node_id(s, "missing 'S' prefix"))?;

        let (plane_str, sat_str) = body
            .split_once(NODE_SEPARATOR)
            .ok_or_else(|| PlaybackError::malformed_node_id(s, "missing '_' separator"))?;

        let plane = plane_str
            .parse::<u32>()
            .map_err(|_| PlaybackError::malformed_node_id(s, "plane is not a non-negative integer"))?;
        let satellite = sat_str
            .parse::<u32>()
            .map_err(|_| PlaybackError::malformed_node_id(s, "satellite is not a non-negative integer"))?;

        Ok(Self { plane, satellite })
    }
}

impl Serialize for NodeAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
