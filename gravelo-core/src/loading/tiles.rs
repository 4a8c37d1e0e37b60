use std::path::{Path as FsPath, PathBuf};

use geo::Point;
use log::info;
use rayon::prelude::*;

use crate::Error;
use crate::loading::builder::build_network;
use crate::loading::config::TileIndexConfig;
use crate::loading::de::{RawBbox, RawTile};
use crate::model::CycleNetwork;

/// One loaded regional tile: its coverage box and routable network.
#[derive(Debug, Clone)]
struct Tile {
    name: String,
    bbox: RawBbox,
    network: CycleNetwork,
}

impl Tile {
    fn covers(&self, point: &Point<f64>) -> bool {
        let (lon, lat) = (point.x(), point.y());
        lon >= self.bbox.min_lon
            && lon <= self.bbox.max_lon
            && lat >= self.bbox.min_lat
            && lat <= self.bbox.max_lat
    }
}

/// Read-only catalog of regional networks, keyed by geography.
///
/// Loaded exactly once at process startup and shared by reference with
/// every request afterwards; concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct TileIndex {
    tiles: Vec<Tile>,
}

impl TileIndex {
    /// Loads every `*.json` tile under the configured directory, in
    /// parallel.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be read, contains no tiles, or any
    /// tile file is malformed. A broken catalog is a deployment fault and
    /// must abort startup rather than surface per-request.
    pub fn load(config: &TileIndexConfig) -> Result<Self, Error> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&config.tiles_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(Error::InvalidData(format!(
                "no tile files found in {}",
                config.tiles_dir.display()
            )));
        }

        let tiles: Vec<Tile> = paths
            .par_iter()
            .map(|path| load_tile(path))
            .collect::<Result<_, _>>()?;

        info!("loaded {} network tile(s)", tiles.len());
        for tile in &tiles {
            info!(
                "tile {}: {} nodes, {} edges",
                tile.name,
                tile.network.node_count(),
                tile.network.edge_count()
            );
        }

        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Network of the first tile covering both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegionUnsupported`] when no loaded tile covers
    /// both points, including the case of origin and destination falling
    /// into different tiles.
    pub fn resolve(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<&CycleNetwork, Error> {
        self.tiles
            .iter()
            .find(|tile| tile.covers(origin) && tile.covers(destination))
            .map(|tile| &tile.network)
            .ok_or(Error::RegionUnsupported)
    }
}

fn load_tile(path: &FsPath) -> Result<Tile, Error> {
    let data = std::fs::read_to_string(path)?;
    let raw: RawTile = serde_json::from_str(&data)
        .map_err(|e| Error::InvalidData(format!("tile {}: {e}", path.display())))?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let bbox = raw.bbox;
    let network = build_network(raw)
        .map_err(|e| Error::InvalidData(format!("tile {}: {e}", path.display())))?;

    Ok(Tile {
        name,
        bbox,
        network,
    })
}
