//! Route search: shortest-path primitive, alternative-route
//! orchestration, and derived route metrics.

pub mod alternatives;
pub mod dijkstra;
pub mod metrics;
pub mod route;

pub use alternatives::{RouteSet, RoutingParams, SearchOutcome, build_routes};
pub use dijkstra::{Path, shortest_path};
pub use metrics::{RouteMetrics, route_metrics};
pub use route::Route;
