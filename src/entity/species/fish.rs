//! Fish: flees sharks, forages shrimp, rests at coral when sated
//!
//! The shelter cycle: a sated fish off cooldown heads for the nearest coral
//! in range other than the one it last used. Once inside the coral's rest
//! radius it slows down and counts rest ticks. After `rest_ticks` it
//! remembers that coral, drops it and waits out `shelter_cooldown_ticks`
//! before looking for the next one. A nearby shark cancels any rest.

use crate::core::config::FishParams;
use crate::core::types::{AgentId, Species};
use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;
use crate::simulation::kinematics::{steer_away, steer_toward};
use crate::spatial::nearest::nearest;

pub fn act(idx: usize, agents: &mut [Agent], ctx: &StepContext) -> Option<AgentId> {
    let params = &ctx.config.species.fish;
    let vision = params.body.vision;
    {
        let fish = &mut agents[idx];
        fish.health -= params.metabolism;
        fish.timers.shelter_cooldown = fish.timers.shelter_cooldown.saturating_sub(1);
    }

    let threat = nearest(idx, agents, Species::Shark, vision, None)
        .found()
        .filter(|&(_, distance)| distance < params.flee_radius);
    if let Some((shark, distance)) = threat {
        let shark_pos = agents[shark].position;
        let fish = &mut agents[idx];
        fish.timers.abandon_shelter();
        steer_away(fish, shark_pos, distance, params.flee_accel);
        return None;
    }

    if agents[idx].health < params.hungry_below {
        let (food, distance) = nearest(idx, agents, Species::Shrimp, vision, None).found()?;
        let food_pos = agents[food].position;
        let fish = &mut agents[idx];
        steer_toward(fish, food_pos, distance, params.pursuit_accel);
        if distance < params.eat_radius {
            fish.health = ctx.config.ecology.max_health;
            return Some(super::consume(agents, food));
        }
        return None;
    }

    if agents[idx].timers.shelter_cooldown == 0 {
        seek_shelter(idx, agents, params);
    }
    None
}

fn seek_shelter(idx: usize, agents: &mut [Agent], params: &FishParams) {
    let skip = agents[idx].timers.last_shelter;
    let found = nearest(idx, agents, Species::Coral, params.body.vision, skip)
        .found()
        .filter(|&(_, distance)| distance < params.shelter_radius);
    let Some((coral, distance)) = found else {
        agents[idx].timers.abandon_shelter();
        return;
    };
    let (coral_id, coral_pos, coral_size) = (agents[coral].id, agents[coral].position, agents[coral].size);

    let fish = &mut agents[idx];
    if fish.timers.current_shelter != Some(coral_id) {
        fish.timers.current_shelter = Some(coral_id);
        fish.timers.shelter_timer = 0;
    }

    if distance >= coral_size + fish.size {
        steer_toward(fish, coral_pos, distance, params.shelter_accel);
        return;
    }

    fish.velocity = fish.velocity * params.rest_damping;
    fish.timers.shelter_timer += 1;
    if fish.timers.shelter_timer >= params.rest_ticks {
        tracing::debug!("fish {} leaves coral {}", fish.id, coral_id);
        fish.timers.last_shelter = Some(coral_id);
        fish.timers.current_shelter = None;
        fish.timers.shelter_timer = 0;
        fish.timers.shelter_cooldown = params.shelter_cooldown_ticks;
    }
}
