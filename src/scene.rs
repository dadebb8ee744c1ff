//! Static scene geometry derived from the loaded routes.
//!
//! Built once per input and shared across frames: the full constellation
//! grid (with satellites that appear on some route flagged, so the consumer
//! can highlight used vs. unused hardware) and one polyline per route. How
//! these are meshed, colored, and lit is the renderer's business.

use std::collections::BTreeSet;

use glam::DVec3;
use tracing::warn;

use crate::{ConstellationModel, NodeAddress, Route, RouteColor};

/// One satellite of the constellation grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatellitePoint {
    pub node: NodeAddress,
    pub position: DVec3,
    /// Whether any route's path touches this satellite.
    pub on_route: bool,
}

/// Line geometry for one route, as endpoint pairs per hop.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePolyline {
    pub route_idx: usize,
    pub color: RouteColor,
    /// Two points per link, in path order.
    pub points: Vec<DVec3>,
}

/// Static geometry for one `(routes, configuration)` pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneLayout {
    /// Every grid satellite in plane-major order.
    pub satellites: Vec<SatellitePoint>,
    pub routes: Vec<RoutePolyline>,
}

impl SceneLayout {
    /// Derive the layout for a set of routes.
    ///
    /// Link endpoints outside the configured grid cannot be placed; their
    /// hop is dropped from the polyline with a warning and everything else
    /// renders normally.
    pub fn build(routes: &[Route], model: &ConstellationModel) -> Self {
        let mut used: BTreeSet<NodeAddress> = BTreeSet::new();
        let mut polylines = Vec::with_capacity(routes.len());

        for (route_idx, route) in routes.iter().enumerate() {
            let mut points = Vec::with_capacity(route.path.len() * 2);

            for link in &route.path {
                let endpoints = link.endpoints();
                if let Some(out_of_range) = endpoints.iter().find(|addr| !model.contains(**addr)) {
                    warn!(route_idx, node = %out_of_range, "Dropping hop with off-grid endpoint");
                    continue;
                }

                for addr in endpoints {
                    used.insert(addr);
                    points.push(model.position(addr.plane, addr.satellite));
                }
            }

            polylines.push(RoutePolyline { route_idx, color: route.color.clone(), points });
        }

        let satellites = model
            .grid()
            .map(|(node, position)| SatellitePoint { node, position, on_route: used.contains(&node) })
            .collect();

        Self { satellites, routes: polylines }
    }

    /// Satellites touched by at least one route.
    pub fn on_route_count(&self) -> usize {
        self.satellites.iter().filter(|sat| sat.on_route).count()
    }
}
