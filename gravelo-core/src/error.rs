use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Invalid edge attributes: {0}")]
    InvalidEdge(String),
    #[error("No route found between the given points")]
    NoRouteFound,
    #[error("Path is not continuous in the network: {0}")]
    PathDiscontinuity(String),
    #[error("Coordinates are outside every loaded tile")]
    RegionUnsupported,
    #[error("Geometry encoding error: {0}")]
    GeometryEncoding(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
