//! A single candidate route and its client-facing representations.

use geo::LineString;
use geojson::{Feature, Geometry};
use serde_json::json;

use crate::Error;
use crate::model::CycleNetwork;
use crate::routing::dijkstra::Path;
use crate::routing::metrics::{RouteMetrics, route_metrics};

/// One candidate route through a network.
///
/// Holds the resolved path only; geometry and metrics are derived against
/// the owning network on demand. Request-scoped, like everything built
/// for a single routing call.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: Path,
}

impl Route {
    pub(crate) fn new(path: Path) -> Self {
        Self { path }
    }

    /// Route geometry as an ordered lon/lat line string.
    pub fn linestring(&self, network: &CycleNetwork) -> LineString<f64> {
        self.path
            .nodes
            .iter()
            .map(|&node| -> geo::Coord<f64> { network.graph[node].geometry.into() })
            .collect()
    }

    /// Route geometry as a Google polyline with precision 6, the compact
    /// encoding map clients consume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeometryEncoding`] when a coordinate cannot be
    /// encoded (out-of-range values).
    pub fn encoded_polyline(&self, network: &CycleNetwork) -> Result<String, Error> {
        polyline::encode_coordinates(self.linestring(network), 6)
            .map_err(|e| Error::GeometryEncoding(e.to_string()))
    }

    /// Derived metrics of this route.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::PathDiscontinuity`] from the extractor.
    pub fn metrics(&self, network: &CycleNetwork) -> Result<RouteMetrics, Error> {
        route_metrics(network, &self.path)
    }

    /// The route as a `GeoJSON` Feature with distance and duration
    /// properties, for visualization and debugging.
    ///
    /// # Errors
    ///
    /// Propagates metric extraction failures.
    pub fn to_geojson(&self, network: &CycleNetwork) -> Result<Feature, Error> {
        let metrics = self.metrics(network)?;
        let linestring = self.linestring(network);

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new((&linestring).into()),
            "properties": {
                "distance": metrics.distance_m,
                "duration": metrics.duration_s,
            }
        });

        serde_json::from_value(value)
            .map_err(|e| Error::GeometryEncoding(e.to_string()))
    }
}
