//! Startup, configuration and shutdown of the actor system.

pub mod bike_share_system;
pub mod config;

pub use bike_share_system::*;
pub use config::*;
