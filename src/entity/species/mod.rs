//! Species-specific behavior
//!
//! Each mobile or living species has its own rule module. The rule runs
//! between the shared prelude (obstacles, pollution) and the shared
//! epilogue (reproduction, motion) of the behavior step.

mod algae;
mod fish;
mod shark;
mod shrimp;

use rand::Rng;

use crate::core::types::{AgentId, Species};
use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;

/// Apply the species rule of `agents[idx]`, returning the prey it ate
pub fn act<R: Rng + ?Sized>(
    idx: usize,
    agents: &mut [Agent],
    ctx: &StepContext,
    rng: &mut R,
) -> Option<AgentId> {
    match agents[idx].species {
        Species::Shark => shark::act(idx, agents, ctx),
        Species::Fish => fish::act(idx, agents, ctx),
        Species::Shrimp => shrimp::act(idx, agents, ctx, rng),
        Species::Algae => {
            algae::act(&mut agents[idx], ctx);
            None
        }
        // Coral only shelters fish; rocks are terrain
        Species::Coral | Species::Rock => None,
    }
}

/// Mark `agents[prey]` eaten and return its id
fn consume(agents: &mut [Agent], prey: usize) -> AgentId {
    agents[prey].dead = true;
    agents[prey].id
}
