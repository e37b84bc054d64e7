//! Shrimp: grazes algae, otherwise drifts

use rand::Rng;

use crate::core::types::{AgentId, Species, Vec2};
use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;
use crate::simulation::kinematics::steer_toward;
use crate::spatial::nearest::nearest;

pub fn act<R: Rng + ?Sized>(
    idx: usize,
    agents: &mut [Agent],
    ctx: &StepContext,
    rng: &mut R,
) -> Option<AgentId> {
    let params = &ctx.config.species.shrimp;
    agents[idx].health -= params.metabolism;

    if agents[idx].health < params.hungry_below {
        let (food, distance) = nearest(idx, agents, Species::Algae, params.body.vision, None).found()?;
        let food_pos = agents[food].position;
        let shrimp = &mut agents[idx];
        steer_toward(shrimp, food_pos, distance, params.pursuit_accel);
        if distance < params.eat_radius {
            shrimp.health = ctx.config.ecology.max_health;
            return Some(super::consume(agents, food));
        }
        return None;
    }

    if rng.gen::<f32>() < params.wander_chance {
        let nudge = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5);
        agents[idx].velocity += nudge * params.wander_strength;
    }
    None
}
