//! Constellation shell geometry.
//!
//! Maps `(plane, satellite)` addresses onto a spherical orbital shell:
//! planes are spaced evenly around one great circle and satellites evenly
//! along each plane, with odd-indexed planes phase-shifted by half a slot so
//! adjacent planes do not line up into a visually regular grid.
//!
//! Everything here is pure math over the configuration; repeated calls with
//! identical arguments produce bit-identical positions.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{NodeAddress, PlaybackError, Result};

/// Constellation-wide layout constants.
///
/// Treated as configuration; the defaults match the reference simulation
/// (3 planes of 22 satellites on a unit-radius planet at 0.3 altitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    /// Number of orbital planes.
    pub planes: u32,
    /// Satellites per plane.
    pub sats_per_plane: u32,
    /// Planet radius in scene units.
    pub earth_radius: f64,
    /// Shell altitude above the planet surface.
    pub orbit_altitude: f64,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self { planes: 3, sats_per_plane: 22, earth_radius: 1.0, orbit_altitude: 0.3 }
    }
}

impl ConstellationConfig {
    /// Shell radius: planet radius plus orbit altitude.
    pub fn orbit_radius(&self) -> f64 {
        self.earth_radius + self.orbit_altitude
    }

    /// Reject degenerate configurations before they reach the geometry.
    pub fn validate(&self) -> Result<()> {
        if self.planes == 0 {
            return Err(PlaybackError::invalid_config("planes must be at least 1"));
        }
        if self.sats_per_plane == 0 {
            return Err(PlaybackError::invalid_config("sats_per_plane must be at least 1"));
        }
        if self.orbit_radius() <= 0.0 {
            return Err(PlaybackError::invalid_config("orbit radius must be positive"));
        }
        Ok(())
    }
}

/// Static shell geometry for one constellation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstellationModel {
    config: ConstellationConfig,
}

impl ConstellationModel {
    pub fn new(config: ConstellationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }

    /// Whether an address falls inside the configured grid.
    pub fn contains(&self, addr: NodeAddress) -> bool {
        addr.plane < self.config.planes && addr.satellite < self.config.sats_per_plane
    }

    /// Position of a satellite on the orbital shell.
    ///
    /// `theta` spaces planes around the equator, `phi` spaces satellites
    /// along the plane; odd planes get a half-slot phase shift. Spherical to
    /// cartesian with Y up, matching the renderer's axis convention.
    pub fn position(&self, plane: u32, satellite: u32) -> DVec3 {
        let planes = self.config.planes as f64;
        let sats = self.config.sats_per_plane as f64;
        let radius = self.config.orbit_radius();

        let theta = plane as f64 / planes * 2.0 * PI;
        let phase_shift = if plane % 2 == 0 { 0.0 } else { PI / sats };
        let phi = satellite as f64 / sats * 2.0 * PI + phase_shift;

        DVec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        )
    }

    /// Bounds-checked position lookup for an address from input data.
    pub fn resolve(&self, addr: NodeAddress) -> Result<DVec3> {
        if !self.contains(addr) {
            return Err(PlaybackError::NodeOutOfRange {
                node: addr.to_string(),
                planes: self.config.planes,
                sats_per_plane: self.config.sats_per_plane,
            });
        }
        Ok(self.position(addr.plane, addr.satellite))
    }

    /// Every satellite in the configured grid with its shell position,
    /// plane-major order. Used for full-mesh rendering.
    pub fn grid(&self) -> impl Iterator<Item = (NodeAddress, DVec3)> + '_ {
        (0..self.config.planes).flat_map(move |plane| {
            (0..self.config.sats_per_plane).map(move |satellite| {
                (NodeAddress::new(plane, satellite), self.position(plane, satellite))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model() -> ConstellationModel {
        ConstellationModel::new(ConstellationConfig::default()).unwrap()
    }

    proptest! {
        #[test]
        fn prop_positions_lie_on_the_shell(plane in 0u32..3, satellite in 0u32..22) {
            let m = model();
            let pos = m.position(plane, satellite);
            let radius = m.config().orbit_radius();
            prop_assert!((pos.length() - radius).abs() < 1e-9);
        }

        #[test]
        fn prop_positions_are_deterministic(plane in 0u32..3, satellite in 0u32..22) {
            let m = model();
            let a = m.position(plane, satellite);
            let b = m.position(plane, satellite);
            prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
            prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
            prop_assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }

    #[test]
    fn first_satellite_sits_at_the_pole() {
        // plane 0, sat 0: theta = 0, phi = 0 -> (0, R, 0)
        let pos = model().position(0, 0);
        assert!(pos.x.abs() < 1e-12);
        assert!((pos.y - 1.3).abs() < 1e-12);
        assert!(pos.z.abs() < 1e-12);
    }

    #[test]
    fn odd_planes_are_phase_shifted() {
        let m = model();
        // Same slot on adjacent planes must not share the phi angle.
        let even = m.position(0, 0);
        let odd = m.position(1, 0);
        let expected_phi = PI / 22.0;
        assert!((odd.y - 1.3 * expected_phi.cos()).abs() < 1e-12);
        assert!((even.y - odd.y).abs() > 1e-6);
    }

    #[test]
    fn plane_angle_spaces_evenly() {
        let m = model();
        // plane 1, sat 0 has theta = 2pi/3; its x/z split must follow.
        let pos = m.position(1, 0);
        let theta: f64 = 2.0 * PI / 3.0;
        let phi: f64 = PI / 22.0;
        assert!((pos.x - 1.3 * phi.sin() * theta.cos()).abs() < 1e-12);
        assert!((pos.z - 1.3 * phi.sin() * theta.sin()).abs() < 1e-12);
    }

    #[test]
    fn grid_covers_the_whole_constellation() {
        let m = model();
        let grid: Vec<_> = m.grid().collect();
        assert_eq!(grid.len(), 66);
        assert_eq!(grid[0].0, NodeAddress::new(0, 0));
        assert_eq!(grid[65].0, NodeAddress::new(2, 21));
        // plane-major ordering
        assert_eq!(grid[22].0, NodeAddress::new(1, 0));
    }

    #[test]
    fn resolve_rejects_out_of_range_addresses() {
        let m = model();
        assert!(m.resolve(NodeAddress::new(2, 21)).is_ok());
        let err = m.resolve(NodeAddress::new(3, 0)).unwrap_err();
        assert!(matches!(err, PlaybackError::NodeOutOfRange { .. }));
        assert!(err.is_packet_scoped());
        assert!(m.resolve(NodeAddress::new(0, 22)).is_err());
    }

    #[test]
    fn degenerate_configs_are_rejected() {
        let bad = ConstellationConfig { planes: 0, ..Default::default() };
        assert!(ConstellationModel::new(bad).is_err());

        let bad = ConstellationConfig { sats_per_plane: 0, ..Default::default() };
        assert!(ConstellationModel::new(bad).is_err());

        let bad = ConstellationConfig { earth_radius: -2.0, orbit_altitude: 0.3, ..Default::default() };
        assert!(ConstellationModel::new(bad).is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ConstellationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ConstellationConfig::default());

        let config: ConstellationConfig =
            serde_json::from_str(r#"{ "planes": 6, "sats_per_plane": 11 }"#).unwrap();
        assert_eq!(config.planes, 6);
        assert_eq!(config.orbit_radius(), 1.3);
    }
}
