use geo::Point;
use hashbrown::HashMap;
use log::debug;
use petgraph::graph::Graph;

use crate::Error;
use crate::loading::de::{RawEdge, RawNode, RawTile};
use crate::model::{BicycleAccess, CycleEdge, CycleNetwork, CycleNode};

/// Builds a validated network from a tile's JSON text.
///
/// All attribute validation happens here, at construction time: node
/// coordinates must be finite and in range, edge lengths strictly
/// positive and finite, edge endpoints must reference declared nodes.
/// Cost evaluation can then assume a well-formed network.
///
/// # Errors
///
/// Returns an error for malformed JSON or any invariant violation.
pub fn network_from_json(data: &str) -> Result<CycleNetwork, Error> {
    let raw: RawTile =
        serde_json::from_str(data).map_err(|e| Error::InvalidData(format!("tile JSON: {e}")))?;

    build_network(raw)
}

pub(crate) fn build_network(raw: RawTile) -> Result<CycleNetwork, Error> {
    let mut graph = Graph::with_capacity(raw.nodes.len(), raw.edges.len());
    let mut node_ids = HashMap::with_capacity(raw.nodes.len());

    for node in &raw.nodes {
        validate_node(node)?;
        let index = graph.add_node(CycleNode {
            id: node.id,
            geometry: Point::new(node.lon, node.lat),
        });
        if node_ids.insert(node.id, index).is_some() {
            return Err(Error::InvalidData(format!(
                "duplicate node id {} in tile",
                node.id
            )));
        }
    }

    for edge in &raw.edges {
        let attrs = validate_edge(edge)?;
        let from = *node_ids.get(&edge.from).ok_or_else(|| {
            Error::InvalidData(format!("edge references unknown node {}", edge.from))
        })?;
        let to = *node_ids.get(&edge.to).ok_or_else(|| {
            Error::InvalidData(format!("edge references unknown node {}", edge.to))
        })?;

        graph.add_edge(from, to, attrs.clone());
        if !edge.oneway {
            graph.add_edge(to, from, attrs);
        }
    }

    debug!(
        "built network with {} nodes and {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(CycleNetwork::new(graph, node_ids))
}

fn validate_node(node: &RawNode) -> Result<(), Error> {
    let in_range = node.lat.is_finite()
        && node.lon.is_finite()
        && node.lat.abs() <= 90.0
        && node.lon.abs() <= 180.0;
    if !in_range {
        return Err(Error::InvalidCoordinate(format!(
            "node {} has coordinates ({}, {})",
            node.id, node.lat, node.lon
        )));
    }
    Ok(())
}

fn validate_edge(edge: &RawEdge) -> Result<CycleEdge, Error> {
    if !(edge.length.is_finite() && edge.length > 0.0) {
        return Err(Error::InvalidEdge(format!(
            "edge {} -> {} has length {}",
            edge.from, edge.to, edge.length
        )));
    }

    Ok(CycleEdge {
        length_m: edge.length,
        highway: edge.highway.clone(),
        surface: edge.surface.clone(),
        bicycle: BicycleAccess::from_tag(edge.bicycle.as_deref()),
        name: edge.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: &str = r#"{
        "bbox": {"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0},
        "nodes": [
            {"id": 1, "lat": 51.5, "lon": -0.12},
            {"id": 2, "lat": 51.51, "lon": -0.10}
        ],
        "edges": [
            {"from": 1, "to": 2, "length": 1500.0, "highway": "residential",
             "surface": "asphalt", "bicycle": "designated", "name": "Main Rd"}
        ]
    }"#;

    #[test]
    fn builds_two_way_edges_by_default() {
        let network = network_from_json(TILE).unwrap();
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 2);

        let forward = network.edges(network.node_index(1).unwrap()).next().unwrap();
        assert_eq!(forward.weight().bicycle, BicycleAccess::Designated);
        assert_eq!(forward.weight().name.as_deref(), Some("Main Rd"));
    }

    #[test]
    fn oneway_edges_stay_directed() {
        let tile = r#"{
            "bbox": {"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0},
            "nodes": [{"id": 1, "lat": 51.5, "lon": -0.12}, {"id": 2, "lat": 51.51, "lon": -0.10}],
            "edges": [{"from": 1, "to": 2, "length": 1500.0, "oneway": true}]
        }"#;
        let network = network_from_json(tile).unwrap();
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let tile = r#"{
            "bbox": {"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0},
            "nodes": [{"id": 1, "lat": 95.0, "lon": -0.12}],
            "edges": []
        }"#;
        assert!(matches!(
            network_from_json(tile),
            Err(Error::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn non_positive_lengths_are_rejected_at_construction() {
        for length in ["0.0", "-3.5"] {
            let tile = format!(
                r#"{{
                    "bbox": {{"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0}},
                    "nodes": [{{"id": 1, "lat": 51.5, "lon": -0.12}}, {{"id": 2, "lat": 51.51, "lon": -0.10}}],
                    "edges": [{{"from": 1, "to": 2, "length": {length}}}]
                }}"#
            );
            assert!(matches!(
                network_from_json(&tile),
                Err(Error::InvalidEdge(_))
            ));
        }
    }

    #[test]
    fn dangling_edge_endpoints_are_rejected() {
        let tile = r#"{
            "bbox": {"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0},
            "nodes": [{"id": 1, "lat": 51.5, "lon": -0.12}],
            "edges": [{"from": 1, "to": 99, "length": 100.0}]
        }"#;
        assert!(matches!(
            network_from_json(tile),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let tile = r#"{
            "bbox": {"min_lon": -1.0, "min_lat": 50.0, "max_lon": 1.0, "max_lat": 52.0},
            "nodes": [{"id": 1, "lat": 51.5, "lon": -0.12}, {"id": 1, "lat": 51.6, "lon": -0.11}],
            "edges": []
        }"#;
        assert!(matches!(
            network_from_json(tile),
            Err(Error::InvalidData(_))
        ));
    }
}
