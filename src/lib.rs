//! Reef Chronicle - Coral Reef Ecosystem with a Rewindable Timeline

pub mod core;
pub mod entity;
pub mod history;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod timeline;
pub mod world;

pub use crate::core::{ReefError, Result, SimulationConfig};
pub use crate::timeline::TimeTravelController;
