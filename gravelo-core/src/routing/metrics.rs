//! Derived route metrics: distance, duration, and distance-weighted
//! surface/highway composition.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::model::CycleNetwork;
use crate::routing::Path;
use crate::{CYCLING_SPEED, Error};

/// Histogram bucket for segments with no surface/highway tag.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Metrics of a single route.
///
/// Composition maps hold distance-weighted shares per category; the
/// shares sum to 1.0 over the total distance. Composite surface tags are
/// attributed verbatim as their own bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    /// Total distance in meters
    pub distance_m: f64,
    /// Estimated riding time in seconds, a linear model over distance at
    /// [`CYCLING_SPEED`]; not segment-type-aware
    pub duration_s: f64,
    /// Surface category -> share of total distance
    pub surface_composition: HashMap<String, f64>,
    /// Highway category -> share of total distance
    pub highway_composition: HashMap<String, f64>,
}

/// Computes metrics for a resolved path. Pure read of the network.
///
/// # Errors
///
/// Returns [`Error::PathDiscontinuity`] when the path is shorter than one
/// segment or a recorded edge does not connect its consecutive node pair.
/// Either indicates a defect in the search, never a user-caused state.
pub fn route_metrics(network: &CycleNetwork, path: &Path) -> Result<RouteMetrics, Error> {
    if path.nodes.len() < 2 || path.edges.len() + 1 != path.nodes.len() {
        return Err(Error::PathDiscontinuity(format!(
            "path has {} nodes and {} edges",
            path.nodes.len(),
            path.edges.len()
        )));
    }

    let mut distance_m = 0.0;
    let mut surface_lengths: HashMap<String, f64> = HashMap::new();
    let mut highway_lengths: HashMap<String, f64> = HashMap::new();

    for ((from, to), &edge) in path.nodes.iter().copied().tuple_windows().zip(&path.edges) {
        let endpoints = network.graph.edge_endpoints(edge).ok_or_else(|| {
            Error::PathDiscontinuity(format!("edge {} is not in the network", edge.index()))
        })?;
        if endpoints != (from, to) {
            return Err(Error::PathDiscontinuity(format!(
                "edge {} does not connect nodes {} and {}",
                edge.index(),
                from.index(),
                to.index()
            )));
        }

        let attrs = &network.graph[edge];
        distance_m += attrs.length_m;

        let surface = attrs.surface.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        *surface_lengths.entry(surface.to_owned()).or_insert(0.0) += attrs.length_m;

        let highway = attrs.highway.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        *highway_lengths.entry(highway.to_owned()).or_insert(0.0) += attrs.length_m;
    }

    // Edge lengths are validated positive at construction, so the total
    // is a safe divisor here.
    for share in surface_lengths.values_mut() {
        *share /= distance_m;
    }
    for share in highway_lengths.values_mut() {
        *share /= distance_m;
    }

    Ok(RouteMetrics {
        distance_m,
        duration_s: distance_m / CYCLING_SPEED,
        surface_composition: surface_lengths,
        highway_composition: highway_lengths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use petgraph::graph::{Graph, NodeIndex};

    use crate::model::{BicycleAccess, CycleEdge, CycleNode};

    fn tagged_edge(length_m: f64, highway: Option<&str>, surface: Option<&str>) -> CycleEdge {
        CycleEdge {
            length_m,
            highway: highway.map(str::to_owned),
            surface: surface.map(str::to_owned),
            bicycle: BicycleAccess::Unspecified,
            name: None,
        }
    }

    fn chain_network(edges: &[CycleEdge]) -> (CycleNetwork, Path) {
        let mut graph = Graph::new();
        let mut nodes = vec![graph.add_node(CycleNode {
            id: 0,
            geometry: Point::new(0.0, 0.0),
        })];
        let mut edge_indices = Vec::new();
        for (i, edge) in edges.iter().enumerate() {
            let next = graph.add_node(CycleNode {
                id: (i + 1) as i64,
                geometry: Point::new(0.001 * (i + 1) as f64, 0.0),
            });
            edge_indices.push(graph.add_edge(*nodes.last().unwrap(), next, edge.clone()));
            nodes.push(next);
        }
        (
            CycleNetwork::new(graph, hashbrown::HashMap::new()),
            Path {
                nodes,
                edges: edge_indices,
            },
        )
    }

    #[test]
    fn distance_duration_and_shares() {
        let (network, path) = chain_network(&[
            tagged_edge(600.0, Some("residential"), Some("asphalt")),
            tagged_edge(400.0, Some("track"), Some("gravel")),
        ]);

        let metrics = route_metrics(&network, &path).unwrap();
        assert_eq!(metrics.distance_m, 1000.0);
        assert_eq!(metrics.duration_s, 1000.0 / CYCLING_SPEED);
        assert!((metrics.surface_composition["asphalt"] - 0.6).abs() < 1e-9);
        assert!((metrics.surface_composition["gravel"] - 0.4).abs() < 1e-9);
        assert!((metrics.highway_composition["residential"] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn shares_sum_to_one() {
        let (network, path) = chain_network(&[
            tagged_edge(137.0, Some("residential"), Some("asphalt")),
            tagged_edge(263.9, None, Some("gravel;asphalt")),
            tagged_edge(55.3, Some("track"), None),
        ]);

        let metrics = route_metrics(&network, &path).unwrap();
        let surface_total: f64 = metrics.surface_composition.values().sum();
        let highway_total: f64 = metrics.highway_composition.values().sum();
        assert!((surface_total - 1.0).abs() < 1e-6);
        assert!((highway_total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn missing_tags_fall_into_the_unknown_bucket() {
        let (network, path) = chain_network(&[tagged_edge(500.0, None, None)]);

        let metrics = route_metrics(&network, &path).unwrap();
        assert_eq!(metrics.surface_composition[UNKNOWN_CATEGORY], 1.0);
        assert_eq!(metrics.highway_composition[UNKNOWN_CATEGORY], 1.0);
    }

    #[test]
    fn composite_surfaces_keep_their_own_bucket() {
        let (network, path) = chain_network(&[
            tagged_edge(250.0, None, Some("gravel;asphalt")),
            tagged_edge(750.0, None, Some("asphalt")),
        ]);

        let metrics = route_metrics(&network, &path).unwrap();
        assert!((metrics.surface_composition["gravel;asphalt"] - 0.25).abs() < 1e-9);
        assert!((metrics.surface_composition["asphalt"] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn disconnected_node_pair_is_a_discontinuity() {
        let (network, mut path) = chain_network(&[
            tagged_edge(600.0, None, None),
            tagged_edge(400.0, None, None),
        ]);
        // Swap the recorded edges so neither matches its node pair
        path.edges.swap(0, 1);

        assert!(matches!(
            route_metrics(&network, &path),
            Err(Error::PathDiscontinuity(_))
        ));
    }

    #[test]
    fn degenerate_single_node_path_is_rejected() {
        let (network, path) = chain_network(&[tagged_edge(600.0, None, None)]);
        let degenerate = Path {
            nodes: vec![path.nodes[0]],
            edges: Vec::new(),
        };

        assert!(matches!(
            route_metrics(&network, &degenerate),
            Err(Error::PathDiscontinuity(_))
        ));
    }
}
