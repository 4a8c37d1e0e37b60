//! Raw serde types for the tile file format, separated from the
//! validated network model.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawTile {
    pub bbox: RawBbox,
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

/// Lon/lat bounding box of the tile's coverage.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawBbox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEdge {
    pub from: i64,
    pub to: i64,
    /// Segment length in meters
    pub length: f64,
    #[serde(default)]
    pub highway: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    /// Raw OSM `bicycle` tag value
    #[serde(default)]
    pub bicycle: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// One-way segments are stored as a single directed edge
    #[serde(default)]
    pub oneway: bool,
}
