//! Route definitions from the simulation backend.

use serde::{Deserialize, Serialize};

use crate::Link;

/// Route color as received on the wire.
///
/// The backend emits `"#rrggbb"` hex strings; the contract also allows a raw
/// RGB triple in the 0..=1 range, so both forms deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteColor {
    Hex(String),
    Rgb([f32; 3]),
}

impl RouteColor {
    /// Resolve to normalized RGB components.
    ///
    /// Returns `None` for hex strings that do not match `#rrggbb`; the
    /// consuming layer picks its own fallback color in that case (a bad color
    /// is a presentation defect, not a playback failure).
    pub fn rgb(&self) -> Option<[f32; 3]> {
        match self {
            RouteColor::Rgb(rgb) => Some(*rgb),
            RouteColor::Hex(hex) => {
                let digits = hex.strip_prefix('#')?;
                if digits.len() != 6 || !digits.is_ascii() {
                    return None;
                }
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
            }
        }
    }
}

impl Default for RouteColor {
    fn default() -> Self {
        RouteColor::Hex("#ffffff".to_string())
    }
}

/// One route through the constellation: the ordered list of hops a packet
/// traverses, shared by every packet assigned to it.
///
/// The routing backend decorates routes with scheduling metadata
/// (`strategy`, `assigned_packets`, `ratio`); those fields ride along for
/// the consumer but play no part in playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered hop list, e.g. `["S0_0-S0_1", "S0_1-S1_1", ...]`.
    pub path: Vec<Link>,

    /// Display color for the route line and its packets.
    #[serde(default)]
    pub color: RouteColor,

    /// Backend route identifier, when present.
    #[serde(default)]
    pub route_id: Option<u32>,

    /// Routing strategy label from the backend.
    #[serde(default)]
    pub strategy: Option<String>,

    /// Number of fragments the backend assigned to this route.
    #[serde(default)]
    pub assigned_packets: Option<u32>,

    /// Traffic split ratio the router chose for this route.
    #[serde(default)]
    pub ratio: Option<f64>,
}
