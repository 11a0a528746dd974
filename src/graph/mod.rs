pub mod distance;
pub mod graph;
pub mod loader;
pub mod node;
