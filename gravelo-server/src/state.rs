use gravelo_core::loading::TileIndex;
use gravelo_core::routing::RoutingParams;

/// Process-wide immutable state shared with every request handler.
///
/// The tile index is loaded once before the listener binds and never
/// mutated afterwards, so concurrent requests read it without locking.
#[derive(Debug)]
pub struct AppState {
    pub tiles: TileIndex,
    pub routing: RoutingParams,
}
