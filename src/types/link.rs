//! Inter-satellite links.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{NodeAddress, PlaybackError, Result};

/// Separator between the two endpoints of a serialized link.
const LINK_SEPARATOR: char = '-';

/// An unordered pair of satellites joined by a route hop.
///
/// Serialized as `"{u}-{v}"`, e.g. `"S0_1-S0_2"`. Endpoint order is
/// preserved from the wire form but is not semantically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub a: NodeAddress,
    pub b: NodeAddress,
}

impl Link {
    pub fn new(a: NodeAddress, b: NodeAddress) -> Self {
        Self { a, b }
    }

    /// Both endpoints, in wire order.
    pub fn endpoints(&self) -> [NodeAddress; 2] {
        [self.a, self.b]
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.a, LINK_SEPARATOR, self.b)
    }
}

impl FromStr for Link {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self> {
        // Node ids never contain '-', so the first separator splits the pair.
        let (u, v) = s.split_once(LINK_SEPARATOR).ok_or_else(|| PlaybackError::malformed_link(s))?;
        Ok(Self { a: u.parse()?, b: v.parse()? })
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
