//! Road/trail network model

pub mod components;
pub mod graph;

pub use components::{BicycleAccess, CycleEdge, CycleNode};
pub use graph::CycleNetwork;
