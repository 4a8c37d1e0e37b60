pub use crate::{CYCLING_SPEED, DEFAULT_ROUTE_COUNT};

// Re-export key components
pub use crate::cost::{cyclability_cost, cyclability_score};
pub use crate::loading::{TileIndex, TileIndexConfig};
pub use crate::model::{BicycleAccess, CycleEdge, CycleNetwork, CycleNode};
pub use crate::routing::{
    Path, Route, RouteMetrics, RouteSet, RoutingParams, SearchOutcome, build_routes,
    route_metrics,
};

pub use crate::Error;
pub use crate::OsmNodeId;
