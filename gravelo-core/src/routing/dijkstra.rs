use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::model::CycleNetwork;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    hops: usize,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // equal-cost states prefer the one with fewer edges
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.hops.cmp(&self.hops))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered node sequence through the network together with the
/// concrete edge chosen between each consecutive pair.
///
/// Keeping the edges disambiguates parallel ways between the same node
/// pair. `nodes.len() == edges.len() + 1`, with at least two nodes.
#[derive(Debug, Clone)]
pub struct Path {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
}

impl Path {
    /// Total length of the traversed segments in meters.
    pub fn total_length(&self, network: &CycleNetwork) -> f64 {
        self.edges
            .iter()
            .map(|&edge| network.graph[edge].length_m)
            .sum()
    }
}

/// Dijkstra's algorithm over the network with a caller-supplied edge
/// weight, tracking predecessor edges so the reconstructed [`Path`]
/// names the exact segment taken between every node pair.
///
/// Weights must be positive and finite. Equal-weight paths resolve to
/// the one with fewer edges; remaining ties keep the first path found
/// (heap order is deterministic).
///
/// Returns `None` when `end` is unreachable from `start`, or when
/// `start == end` (there is no segment to traverse).
pub fn shortest_path(
    network: &CycleNetwork,
    start: NodeIndex,
    end: NodeIndex,
    weight_fn: impl Fn(EdgeIndex) -> f64,
) -> Option<Path> {
    if start == end {
        return None;
    }

    let estimated_nodes = network.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, (f64, usize)> =
        HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        hops: 0,
        node: start,
    });
    distances.insert(start, (0.0, 0));

    while let Some(State { cost, hops, node }) = heap.pop() {
        if node == end {
            break;
        }

        // Skip if we've found a better path
        if let Some(&(best_cost, best_hops)) = distances.get(&node) {
            if cost > best_cost || (cost == best_cost && hops > best_hops) {
                continue;
            }
        }

        // Examine neighbors; parallel edges are visited individually
        for edge in network.edges(node) {
            let next = edge.target();
            let next_cost = cost + weight_fn(edge.id());
            let next_hops = hops + 1;

            let improved = match distances.get(&next) {
                None => true,
                Some(&(best_cost, best_hops)) => {
                    next_cost < best_cost || (next_cost == best_cost && next_hops < best_hops)
                }
            };

            if improved {
                distances.insert(next, (next_cost, next_hops));
                predecessors.insert(next, (node, edge.id()));
                heap.push(State {
                    cost: next_cost,
                    hops: next_hops,
                    node: next,
                });
            }
        }
    }

    if !predecessors.contains_key(&end) {
        return None;
    }

    // Follow predecessors backward from end to start
    let mut nodes = vec![end];
    let mut edges = Vec::new();
    let mut current = end;
    while current != start {
        let &(prev, via) = predecessors.get(&current)?;
        nodes.push(prev);
        edges.push(via);
        current = prev;
    }
    nodes.reverse();
    edges.reverse();

    Some(Path { nodes, edges })
}
