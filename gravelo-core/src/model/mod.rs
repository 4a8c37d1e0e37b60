//! Data model for the cycling road/trail network.

pub mod network;

pub use network::{BicycleAccess, CycleEdge, CycleNetwork, CycleNode};
