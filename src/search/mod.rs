pub mod config;
pub mod engine;
pub mod monitor;
pub mod result;
pub mod scorer;
pub mod state;
pub mod stats;
