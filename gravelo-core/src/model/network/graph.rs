//! Directed multigraph over road/trail segments with a spatial index
//! for nearest-node lookup.

use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use petgraph::graph::{Edges, Graph, NodeIndex};
use petgraph::Directed;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::OsmNodeId;
use crate::model::network::components::{CycleEdge, CycleNode};

/// Node position indexed by the R-tree, carrying its graph index.
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Routable network for one region.
///
/// Parallel edges between the same ordered node pair are allowed; two-way
/// segments are stored as two directed edges. The network is immutable
/// after construction and safe to share read-only across requests.
#[derive(Debug, Clone)]
pub struct CycleNetwork {
    pub graph: Graph<CycleNode, CycleEdge>,
    rtree: RTree<IndexedPoint>,
    node_ids: HashMap<OsmNodeId, NodeIndex>,
}

impl CycleNetwork {
    pub(crate) fn new(
        graph: Graph<CycleNode, CycleEdge>,
        node_ids: HashMap<OsmNodeId, NodeIndex>,
    ) -> Self {
        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| {
                    let point = graph[idx].geometry;
                    IndexedPoint::new([point.x(), point.y()], idx)
                })
                .collect(),
        );

        Self {
            graph,
            rtree,
            node_ids,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Outgoing edges of a node, parallel edges included.
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, CycleEdge, Directed> {
        self.graph.edges(node)
    }

    /// Graph index of a node by its OSM ID.
    pub fn node_index(&self, id: OsmNodeId) -> Option<NodeIndex> {
        self.node_ids.get(&id).copied()
    }

    /// Nearest network node to a point, with the great-circle distance to
    /// it in meters.
    ///
    /// The R-tree candidate is found on raw lon/lat coordinates; the
    /// reported distance is haversine meters.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        let nearest = self.rtree.nearest_neighbor(&[point.x(), point.y()])?;
        let node_point = self.graph[nearest.data].geometry;

        Some((nearest.data, Haversine.distance(*point, node_point)))
    }
}
