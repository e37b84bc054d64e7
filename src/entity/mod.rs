pub mod agent;
pub mod shape;
pub mod species;

pub use agent::{Agent, BehaviorTimers};
pub use shape::{ShapeData, SubShape};
