pub mod config;
pub mod environment;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use environment::Environment;
pub use error::{ReefError, Result};
pub use types::{AgentId, Bounds, SimTime, Species, Vec2};
