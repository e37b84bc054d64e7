//! World step - advances the whole reef by one tick
//!
//! behavior pass -> births -> compaction -> bloom
//!
//! Agents are processed in order. An agent killed earlier in the pass is
//! skipped for the rest of it; newborns join after the pass and act from
//! the next tick on.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, Species, Vec2};
use crate::simulation::behavior::{update_agent, StepContext};
use crate::spatial::obstacles::obstacle_footprints;
use crate::world::ReefWorld;

/// Events generated during a world step
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A predator or grazer ate another agent
    Eaten {
        eater: AgentId,
        prey: AgentId,
        prey_species: Species,
    },
    /// A breeding pair produced offspring
    Born {
        parent: AgentId,
        mate: AgentId,
        child: AgentId,
        species: Species,
    },
    /// Spontaneous algae growth
    Bloom { id: AgentId },
    /// An agent left the world at compaction
    Removed { id: AgentId, species: Species },
}

struct Birth {
    parent: AgentId,
    mate: AgentId,
    species: Species,
    position: Vec2,
}

/// Run one tick over every agent in `world`
///
/// Returns the events that occurred, `Removed` entries in agent order.
pub fn run_world_step<R: Rng + ?Sized>(
    world: &mut ReefWorld,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let births = behavior_pass(world, config, rng, &mut events);

    for birth in births {
        let child = world.spawn_agent(birth.species, birth.position, config, rng);
        events.push(SimulationEvent::Born {
            parent: birth.parent,
            mate: birth.mate,
            child,
            species: birth.species,
        });
    }

    for agent in world.remove_dead() {
        events.push(SimulationEvent::Removed {
            id: agent.id,
            species: agent.species,
        });
    }

    if let Some(id) = try_bloom(world, config, rng) {
        events.push(SimulationEvent::Bloom { id });
    }

    events
}

fn behavior_pass<R: Rng + ?Sized>(
    world: &mut ReefWorld,
    config: &SimulationConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) -> Vec<Birth> {
    let obstacles = obstacle_footprints(&world.agents);
    let ctx = StepContext {
        config,
        environment: &world.environment,
        bounds: world.bounds,
        obstacles: &obstacles,
    };

    let mut births = Vec::new();
    for idx in 0..world.agents.len() {
        let agent = &world.agents[idx];
        if agent.dead || agent.species.is_obstacle() {
            continue;
        }
        let parent = agent.id;

        let mut offspring: Option<(Species, Vec2)> = None;
        let report = update_agent(idx, &mut world.agents, &ctx, rng, &mut |species, position| {
            offspring = Some((species, position));
        });

        // Prey stays in the slice, flagged dead, until compaction
        if let Some(prey) = report.ate.and_then(|id| world.agents.iter().find(|a| a.id == id)) {
            events.push(SimulationEvent::Eaten {
                eater: parent,
                prey: prey.id,
                prey_species: prey.species,
            });
        }
        if let (Some((species, position)), Some(mate)) = (offspring, report.bred_with) {
            births.push(Birth {
                parent,
                mate,
                species,
                position,
            });
        }
    }
    births
}

/// Occasionally grow a new algae at a random spot in favorable water
fn try_bloom<R: Rng + ?Sized>(
    world: &mut ReefWorld,
    config: &SimulationConfig,
    rng: &mut R,
) -> Option<AgentId> {
    let bloom = &config.ecology.bloom;
    if !bloom.favorable(&world.environment) || rng.gen::<f32>() >= bloom.chance {
        return None;
    }
    let id = world.spawn_random(Species::Algae, config, rng);
    tracing::debug!("Algae bloom: {}", id);
    Some(id)
}
