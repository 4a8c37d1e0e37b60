//! Alternative-route orchestration via iterative edge penalization.
//!
//! The underlying search yields a single best path, so diversity comes
//! from re-running it on a penalized copy of the weights: every found
//! path's edges get more expensive before the next round, and a new path
//! is accepted only if it overlaps the already accepted ones below a
//! configured threshold.

use hashbrown::HashSet;
use log::debug;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Deserialize;

use crate::cost::cyclability_cost;
use crate::model::CycleNetwork;
use crate::routing::dijkstra::{Path, shortest_path};
use crate::routing::route::Route;
use crate::{DEFAULT_ROUTE_COUNT, Error};

/// Tunables of the alternative-route search.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingParams {
    /// Number of distinct candidate routes requested (k >= 1)
    pub route_count: usize,
    /// Weight multiplier applied to a found path's edges before the next
    /// round (> 1); compounds across rounds. The cost scale spans many
    /// orders of magnitude between paved and penalized segments, so the
    /// factor has to be aggressive for alternatives to surface within
    /// the attempt budget
    pub penalty_factor: f64,
    /// Maximum shared-edge length fraction between two accepted routes,
    /// measured against the shorter of the two
    pub max_overlap: f64,
    /// Upper bound on search rounds per request
    pub max_attempts: usize,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            route_count: DEFAULT_ROUTE_COUNT,
            penalty_factor: 10.0,
            max_overlap: 0.8,
            max_attempts: 12,
        }
    }
}

impl RoutingParams {
    fn validate(&self) -> Result<(), Error> {
        if self.route_count < 1 {
            return Err(Error::InvalidData(
                "route_count must be at least 1".to_string(),
            ));
        }
        if !(self.penalty_factor.is_finite() && self.penalty_factor > 1.0) {
            return Err(Error::InvalidData(format!(
                "penalty_factor must be greater than 1, got {}",
                self.penalty_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.max_overlap) {
            return Err(Error::InvalidData(format!(
                "max_overlap must be within [0, 1], got {}",
                self.max_overlap
            )));
        }
        if self.max_attempts < self.route_count {
            return Err(Error::InvalidData(format!(
                "max_attempts ({}) must not be below route_count ({})",
                self.max_attempts, self.route_count
            )));
        }
        Ok(())
    }
}

/// How the alternative-route search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The requested number of distinct routes was found
    Complete,
    /// The iteration budget ran out first; at least one route was found.
    /// A valid outcome, not an error: fewer diverse alternatives exist.
    Partial,
}

/// Up to k pairwise-distinct routes for one request, best first.
#[derive(Debug, Clone)]
pub struct RouteSet {
    pub routes: Vec<Route>,
    pub outcome: SearchOutcome,
}

impl RouteSet {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builds up to `params.route_count` materially different routes between
/// two network nodes, ranked by the cyclability cost model.
///
/// # Errors
///
/// Returns [`Error::NoRouteFound`] when the nodes are not connected, and
/// [`Error::InvalidEdge`] when any network edge carries attributes the
/// cost model rejects.
pub fn build_routes(
    network: &CycleNetwork,
    start: NodeIndex,
    end: NodeIndex,
    params: &RoutingParams,
) -> Result<RouteSet, Error> {
    params.validate()?;

    // Base weights are computed once per edge; attribute faults surface
    // here rather than mid-search.
    let mut weights = vec![0.0; network.edge_count()];
    for edge in network.graph.edge_references() {
        weights[edge.id().index()] = cyclability_cost(edge.weight())?;
    }

    let mut accepted: Vec<Path> = Vec::new();

    for attempt in 1..=params.max_attempts {
        if accepted.len() >= params.route_count {
            break;
        }

        let Some(path) = shortest_path(network, start, end, |e| weights[e.index()]) else {
            break;
        };

        let distinct = accepted
            .iter()
            .all(|prev| shared_length_fraction(network, &path, prev) <= params.max_overlap);

        // Penalize the found path either way, so a rejected near-duplicate
        // keeps getting more expensive until the search leaves it.
        for &edge in &path.edges {
            weights[edge.index()] *= params.penalty_factor;
        }

        if distinct {
            debug!(
                "accepted route {} after {attempt} search round(s)",
                accepted.len() + 1
            );
            accepted.push(path);
        }
    }

    if accepted.is_empty() {
        return Err(Error::NoRouteFound);
    }

    let outcome = if accepted.len() >= params.route_count {
        SearchOutcome::Complete
    } else {
        SearchOutcome::Partial
    };

    Ok(RouteSet {
        routes: accepted.into_iter().map(Route::new).collect(),
        outcome,
    })
}

/// Length of the edges two paths share, as a fraction of the shorter
/// path's total length.
fn shared_length_fraction(network: &CycleNetwork, a: &Path, b: &Path) -> f64 {
    let b_edges: HashSet<_> = b.edges.iter().copied().collect();
    let shared: f64 = a
        .edges
        .iter()
        .filter(|edge| b_edges.contains(*edge))
        .map(|&edge| network.graph[edge].length_m)
        .sum();

    shared / a.total_length(network).min(b.total_length(network))
}
