//! Ecosystem integration tests: whole-world steps without the timeline

use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::FRAC_PI_2;

use reef_chronicle::core::types::{Species, Vec2};
use reef_chronicle::core::{Environment, SimulationConfig};
use reef_chronicle::simulation::{run_world_step, SimulationEvent};
use reef_chronicle::world::{Census, ReefWorld};

fn empty_world(environment: Environment) -> ReefWorld {
    ReefWorld::new(SimulationConfig::default().world.bounds(), environment)
}

#[test]
fn test_hungry_shark_catches_adjacent_fish() {
    let config = SimulationConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    // Too warm for blooms, so the only events come from the pair
    let mut world = empty_world(Environment::new(30.0, 0.0));
    let shark = world.spawn_agent(Species::Shark, Vec2::new(600.0, 300.0), &config, &mut rng);
    let fish = world.spawn_agent(Species::Fish, Vec2::new(605.0, 300.0), &config, &mut rng);
    world.agents[0].health = 60.0;

    let events = run_world_step(&mut world, &config, &mut rng);

    assert!(world.get(fish).is_none());
    let shark_health = world.get(shark).map(|a| a.health).unwrap();
    assert!(shark_health > 60.0 && shark_health <= 100.0);
    assert!(events.contains(&SimulationEvent::Removed {
        id: fish,
        species: Species::Fish,
    }));
}

#[test]
fn test_idle_agent_keeps_facing() {
    let config = SimulationConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut world = empty_world(Environment::new(30.0, 0.0));
    let shark = world.spawn_agent(Species::Shark, Vec2::new(600.0, 300.0), &config, &mut rng);
    {
        let agent = &mut world.agents[0];
        agent.velocity = Vec2::ZERO;
        agent.angle = FRAC_PI_2;
    }

    run_world_step(&mut world, &config, &mut rng);

    let agent = world.get(shark).unwrap();
    assert_eq!(agent.angle, FRAC_PI_2);
    assert_eq!(agent.position, Vec2::new(600.0, 300.0));
}

#[test]
fn test_heavy_pollution_wipes_out_stationary_life() {
    let config = SimulationConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut world = empty_world(Environment::new(25.0, 100.0));
    for i in 0..3 {
        let x = 100.0 + i as f32 * 200.0;
        world.spawn_agent(Species::Coral, Vec2::new(x, 200.0), &config, &mut rng);
        world.spawn_agent(Species::Algae, Vec2::new(x, 500.0), &config, &mut rng);
    }
    world.spawn_agent(Species::Rock, Vec2::new(1100.0, 600.0), &config, &mut rng);

    // 80 excess pollution * 0.002 = 0.16 health per tick: gone after 625 ticks
    let mut removed = Vec::new();
    for _ in 0..700 {
        for event in run_world_step(&mut world, &config, &mut rng) {
            if let SimulationEvent::Removed { species, .. } = event {
                removed.push(species);
            }
        }
    }

    assert_eq!(removed.len(), 6);
    let census = Census::from_agents(&world.agents);
    assert_eq!(census.count(Species::Coral), 0);
    assert_eq!(census.count(Species::Algae), 0);
    // Rocks do not feel pollution
    assert_eq!(census.count(Species::Rock), 1);
}

#[test]
fn test_clean_cool_water_grows_algae() {
    let config = SimulationConfig::default();
    let mut world = empty_world(Environment::new(24.0, 0.0));
    // Every roll succeeds: one bloom per tick
    let mut rng = StepRng::new(0, 0);
    for _ in 0..10 {
        run_world_step(&mut world, &config, &mut rng);
    }
    assert_eq!(world.count_of(Species::Algae), 10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn proptest_health_stays_bounded(
        seed in any::<u64>(),
        temperature in 15.0f32..35.0,
        pollution in 0.0f32..100.0,
    ) {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut world = empty_world(Environment::new(temperature, pollution));
        world.populate(&config.population, &config, &mut rng);

        for _ in 0..40 {
            run_world_step(&mut world, &config, &mut rng);
            for agent in &world.agents {
                prop_assert!(!agent.dead);
                prop_assert!(agent.health >= 0.0 && agent.health <= config.ecology.max_health);
                prop_assert!(agent.position.x.is_finite() && agent.position.y.is_finite());
            }
        }
    }
}
