//! Pairwise breeding for mobile species

use rand::Rng;

use crate::core::types::{AgentId, Species, Vec2};
use crate::entity::agent::Agent;
use crate::simulation::behavior::StepContext;
use crate::spatial::nearest::nearest;

/// Try to breed `agents[idx]` with its nearest same-species neighbor
///
/// While the cooldown runs it only counts down. Otherwise both partners
/// need `required_health`, the mate must be off cooldown and within
/// `size * mate_range_factor`, and a roll against the breeding chance must
/// succeed. On success the newborn is handed to `spawn` at the parent's
/// position, both partners pay `birth_cost` and restart their cooldowns,
/// and the parent turns around so the pair separates.
pub fn try_reproduce<R: Rng + ?Sized>(
    idx: usize,
    agents: &mut [Agent],
    ctx: &StepContext,
    rng: &mut R,
    spawn: &mut dyn FnMut(Species, Vec2),
) -> Option<AgentId> {
    let table = &ctx.config.species;
    let rules = &table.reproduction;

    let agent = &mut agents[idx];
    let species = agent.species;
    let breeding = table.breeding(species)?;

    if agent.timers.reproduction_cooldown > 0.0 {
        agent.timers.reproduction_cooldown = (agent.timers.reproduction_cooldown - 1.0).max(0.0);
        return None;
    }
    if agent.health < breeding.required_health {
        return None;
    }

    let (mate_idx, distance) = nearest(idx, agents, species, table.body(species).vision, None).found()?;
    let reach = agents[idx].size * rules.mate_range_factor;
    let mate = &agents[mate_idx];
    if distance >= reach
        || mate.health < breeding.required_health
        || mate.timers.reproduction_cooldown > 0.0
    {
        return None;
    }

    if rng.gen::<f32>() >= rules.chance {
        agents[idx].timers.reproduction_cooldown = rules.retry_cooldown;
        return None;
    }

    spawn(species, agents[idx].position);

    for partner in [idx, mate_idx] {
        let a = &mut agents[partner];
        a.timers.reproduction_cooldown = breeding.cooldown_reset;
        a.health = (a.health - breeding.birth_cost).max(0.0);
        if a.health <= 0.0 {
            a.dead = true;
        }
    }
    agents[idx].velocity = -agents[idx].velocity;

    tracing::debug!("{} {} bred with {}", species, agents[idx].id, agents[mate_idx].id);
    Some(agents[mate_idx].id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::environment::Environment;
    use crate::entity::agent::BehaviorTimers;
    use crate::entity::shape::ShapeData;
    use rand::rngs::mock::StepRng;

    fn fish(id: u64, x: f32, health: f32, cooldown: f32) -> Agent {
        Agent {
            id: AgentId(id),
            species: Species::Fish,
            position: Vec2::new(x, 300.0),
            velocity: Vec2::new(1.0, 0.5),
            angle: 0.0,
            health,
            size: 12.0,
            dead: false,
            timers: BehaviorTimers {
                reproduction_cooldown: cooldown,
                ..BehaviorTimers::default()
            },
            shape: ShapeData::Plain,
        }
    }

    fn run(agents: &mut [Agent], rng: &mut StepRng) -> (Option<AgentId>, Vec<(Species, Vec2)>) {
        let config = SimulationConfig::default();
        let env = Environment::default();
        let ctx = StepContext {
            config: &config,
            environment: &env,
            bounds: config.world.bounds(),
            obstacles: &[],
        };
        let mut births = Vec::new();
        let mate = try_reproduce(0, agents, &ctx, rng, &mut |s, p| births.push((s, p)));
        (mate, births)
    }

    #[test]
    fn test_successful_pair_spawns_and_pays() {
        let mut agents = vec![fish(1, 400.0, 90.0, 0.0), fish(2, 420.0, 80.0, 0.0)];
        let (mate, births) = run(&mut agents, &mut StepRng::new(0, 0));

        assert_eq!(mate, Some(AgentId(2)));
        assert_eq!(births, vec![(Species::Fish, Vec2::new(400.0, 300.0))]);
        assert_eq!(agents[0].health, 75.0);
        assert_eq!(agents[1].health, 65.0);
        assert_eq!(agents[0].timers.reproduction_cooldown, 400.0);
        assert_eq!(agents[1].timers.reproduction_cooldown, 400.0);
        assert_eq!(agents[0].velocity, Vec2::new(-1.0, -0.5));
        assert_eq!(agents[1].velocity, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_cooldown_counts_down_only() {
        let mut agents = vec![fish(1, 400.0, 90.0, 3.0), fish(2, 420.0, 90.0, 0.0)];
        let (mate, births) = run(&mut agents, &mut StepRng::new(0, 0));
        assert!(mate.is_none());
        assert!(births.is_empty());
        assert_eq!(agents[0].timers.reproduction_cooldown, 2.0);
    }

    #[test]
    fn test_requirements_block_breeding() {
        // Mate too far: reach is 12 * 3 = 36
        let mut far = vec![fish(1, 400.0, 90.0, 0.0), fish(2, 436.0, 90.0, 0.0)];
        assert!(run(&mut far, &mut StepRng::new(0, 0)).0.is_none());

        // Mate too weak
        let mut weak = vec![fish(1, 400.0, 90.0, 0.0), fish(2, 410.0, 60.0, 0.0)];
        assert!(run(&mut weak, &mut StepRng::new(0, 0)).0.is_none());

        // Mate still cooling down
        let mut busy = vec![fish(1, 400.0, 90.0, 0.0), fish(2, 410.0, 90.0, 10.0)];
        assert!(run(&mut busy, &mut StepRng::new(0, 0)).0.is_none());
        assert_eq!(busy[1].timers.reproduction_cooldown, 10.0);
    }

    #[test]
    fn test_failed_roll_leaves_pair_untouched() {
        let mut agents = vec![fish(1, 400.0, 90.0, 0.0), fish(2, 410.0, 90.0, 0.0)];
        let (mate, births) = run(&mut agents, &mut StepRng::new(u64::MAX, 0));
        assert!(mate.is_none());
        assert!(births.is_empty());
        assert_eq!(agents[0].health, 90.0);
        assert_eq!(agents[0].timers.reproduction_cooldown, 0.0);
    }
}
