//! Spatial queries over the live agent set

pub mod nearest;
pub mod obstacles;

pub use nearest::{nearest, Nearest};
pub use obstacles::{obstacle_footprints, resolve_obstacle_contacts, ObstacleFootprint};
