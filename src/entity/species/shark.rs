//! Shark: apex predator

use crate::core::types::{AgentId, Species};
use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;
use crate::simulation::kinematics::steer_toward;
use crate::spatial::nearest::nearest;

/// Burn energy; when below the hunting threshold chase and eat the
/// nearest fish in sight
pub fn act(idx: usize, agents: &mut [Agent], ctx: &StepContext) -> Option<AgentId> {
    let params = &ctx.config.species.shark;
    agents[idx].health -= params.metabolism;

    if agents[idx].health >= params.hunt_below {
        return None;
    }

    let (prey, distance) = nearest(idx, agents, Species::Fish, params.body.vision, None).found()?;
    let (prey_pos, prey_size) = (agents[prey].position, agents[prey].size);

    let shark = &mut agents[idx];
    steer_toward(shark, prey_pos, distance, params.pursuit_accel);

    if distance < shark.size + prey_size {
        shark.health = (shark.health + params.meal_heal).min(ctx.config.ecology.max_health);
        return Some(super::consume(agents, prey));
    }
    None
}
