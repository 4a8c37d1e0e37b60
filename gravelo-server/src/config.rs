use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use gravelo_core::routing::RoutingParams;
use serde::Deserialize;

/// Server configuration, read from a TOML file at startup.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Directory with the regional network tiles
    pub tiles_dir: PathBuf,
    /// Alternative-route search tunables
    #[serde(default)]
    pub routing: RoutingParams,
}

fn default_listen() -> SocketAddr {
    ([0, 0, 0, 0], 3000).into()
}

pub fn load(path: &Path) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    let config = toml::from_str(&raw)
        .map_err(|e| format!("cannot parse config {}: {e}", path.display()))?;
    Ok(config)
}
