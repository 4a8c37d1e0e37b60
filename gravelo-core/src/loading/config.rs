use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for loading the tile catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct TileIndexConfig {
    /// Directory holding one JSON file per regional tile
    pub tiles_dir: PathBuf,
}
