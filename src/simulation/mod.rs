//! Ecosystem simulation: the per-agent behavior step and the world step

pub mod behavior;
pub mod kinematics;
pub mod reproduction;
pub mod tick;

pub use behavior::{update_agent, StepContext, StepReport};
pub use tick::{run_world_step, SimulationEvent};
