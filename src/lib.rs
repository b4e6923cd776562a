pub mod config;
pub mod simulation;

pub use config::*;
pub use simulation::*;
