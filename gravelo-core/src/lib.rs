//! Gravel-cycling route planner core.
//!
//! Builds up to K materially different bicycle routes through a regional
//! road/trail network, ranked by a gravel-avoidance cyclability cost
//! rather than plain distance.

pub mod cost;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::CycleNetwork;

/// Assumed average cycling speed in meters per second (~15 km/h).
///
/// Route durations are a linear model over distance only; they are not
/// segment-type-aware.
pub const CYCLING_SPEED: f64 = 4.2;

/// Number of candidate routes built per request unless overridden.
pub const DEFAULT_ROUTE_COUNT: usize = 3;

/// OSM identifier of a source node, kept for reference back into the
/// upstream data set.
pub type OsmNodeId = i64;
