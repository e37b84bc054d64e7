//! Per-agent behavior step
//!
//! One call advances one agent by one tick:
//! obstacle contact -> pollution -> species rule -> reproduction -> motion.
//!
//! The agent works on the whole slice by index so that eating and breeding
//! can touch the prey or mate in place. New agents are never pushed into
//! the slice during the pass; they are handed to the `spawn` callback.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::environment::Environment;
use crate::core::types::{AgentId, Bounds, Species, Vec2};
use crate::entity::agent::Agent;
use crate::entity::species;
use crate::simulation::{kinematics, reproduction};
use crate::spatial::obstacles::{resolve_obstacle_contacts, ObstacleFootprint};

/// Read-only inputs shared by every agent during one tick
pub struct StepContext<'a> {
    pub config: &'a SimulationConfig,
    pub environment: &'a Environment,
    pub bounds: Bounds,
    /// Obstacles as they stood at the start of the tick
    pub obstacles: &'a [ObstacleFootprint],
}

/// What one agent did during its step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Prey consumed this tick
    pub ate: Option<AgentId>,
    /// Partner of a successful breeding
    pub bred_with: Option<AgentId>,
    /// The agent's own health reached zero
    pub died: bool,
}

/// Advance `agents[idx]` by one tick
///
/// Dead agents and obstacles are left untouched. Health is clamped to
/// `[0, max_health]` afterwards; an agent at zero is marked dead.
pub fn update_agent<R: Rng + ?Sized>(
    idx: usize,
    agents: &mut [Agent],
    ctx: &StepContext,
    rng: &mut R,
    spawn: &mut dyn FnMut(Species, Vec2),
) -> StepReport {
    let mut report = StepReport::default();
    let Some(agent) = agents.get_mut(idx) else {
        return report;
    };
    if agent.dead || agent.species.is_obstacle() {
        return report;
    }
    let species = agent.species;
    let ecology = &ctx.config.ecology;

    resolve_obstacle_contacts(agent, ctx.obstacles, ecology);
    apply_pollution(agent, ctx);

    report.ate = species::act(idx, agents, ctx, rng);
    report.bred_with = reproduction::try_reproduce(idx, agents, ctx, rng, spawn);

    let agent = &mut agents[idx];
    kinematics::integrate(agent, ctx.config.species.body(species), ecology, ctx.bounds);

    agent.health = agent.health.clamp(0.0, ecology.max_health);
    if agent.health <= 0.0 {
        agent.dead = true;
        report.died = true;
    }
    report
}

/// Drain health in proportion to pollution above the baseline
fn apply_pollution(agent: &mut Agent, ctx: &StepContext) {
    let ecology = &ctx.config.ecology;
    if !ctx.config.species.body(agent.species).pollution_sensitive {
        return;
    }
    let excess = ctx.environment.pollution_excess(ecology.pollution_baseline);
    if excess > 0.0 {
        agent.health -= excess * ecology.pollution_damage_rate;
    }
}
