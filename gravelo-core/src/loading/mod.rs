//! Loading of precomputed regional network tiles.
//!
//! Tiles are JSON files, one routable region each, produced by an
//! upstream extraction pipeline. The whole catalog is loaded once at
//! process startup and never mutated afterwards.

mod builder;
mod config;
mod de;
mod tiles;

pub use builder::network_from_json;
pub use config::TileIndexConfig;
pub use tiles::TileIndex;
