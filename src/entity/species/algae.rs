//! Algae: stationary producer driven by the environment

use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;

/// Heat stress above the stress threshold, otherwise slow regrowth in
/// cool clean water
pub fn act(algae: &mut Agent, ctx: &StepContext) {
    let params = &ctx.config.species.algae;
    let env = ctx.environment;

    if env.temperature > params.heat_stress_above {
        algae.health -= params.heat_damage;
    } else if env.temperature < params.growth_max_temperature
        && env.pollution < params.growth_max_pollution
        && algae.health < ctx.config.ecology.max_health
    {
        algae.health += params.growth_rate;
    }
}
