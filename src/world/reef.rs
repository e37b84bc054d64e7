//! The live reef: the authoritative agent set and the environment

use rand::Rng;

use crate::core::config::{PopulationConfig, SimulationConfig};
use crate::core::environment::Environment;
use crate::core::types::{AgentId, Bounds, Species, Vec2};
use crate::entity::agent::Agent;

/// The reef world
///
/// Owns every agent. Ids come from a counter that only moves forward, so
/// an id is never handed out twice within a timeline, even across rewinds.
pub struct ReefWorld {
    pub agents: Vec<Agent>,
    pub environment: Environment,
    pub bounds: Bounds,
    next_id: u64,
}

impl ReefWorld {
    pub fn new(bounds: Bounds, environment: Environment) -> Self {
        Self {
            agents: Vec::new(),
            environment,
            bounds,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an agent at `position` and append it
    pub fn spawn_agent<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        position: Vec2,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> AgentId {
        let id = self.allocate_id();
        self.agents.push(Agent::spawn(id, species, position, config, rng));
        id
    }

    /// Create an agent at a uniformly random position inside the bounds
    pub fn spawn_random<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> AgentId {
        let position = self.random_position(rng);
        self.spawn_agent(species, position, config, rng)
    }

    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen::<f32>() * self.bounds.width,
            rng.gen::<f32>() * self.bounds.height,
        )
    }

    /// Seed the reef with `population`, one species at a time in `Species::ALL` order
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        population: &PopulationConfig,
        config: &SimulationConfig,
        rng: &mut R,
    ) {
        for species in Species::ALL {
            for _ in 0..population.count(species) {
                self.spawn_random(species, config, rng);
            }
        }
    }

    /// Remove every dead agent, returning them in their previous order
    pub fn remove_dead(&mut self) -> Vec<Agent> {
        let (dead, alive): (Vec<Agent>, Vec<Agent>) =
            std::mem::take(&mut self.agents).into_iter().partition(|a| a.dead);
        self.agents = alive;
        dead
    }

    /// Replace the agent set and environment wholesale
    ///
    /// The id counter is raised past the largest restored id and never
    /// lowered.
    pub fn restore(&mut self, agents: Vec<Agent>, environment: Environment) {
        if let Some(max) = agents.iter().map(|a| a.id.0).max() {
            self.next_id = self.next_id.max(max + 1);
        }
        self.agents = agents;
        self.environment = environment;
    }

    /// Drop everything and restart ids from one
    pub fn clear(&mut self, environment: Environment) {
        self.agents.clear();
        self.environment = environment;
        self.next_id = 1;
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn count_of(&self, species: Species) -> usize {
        self.agents.iter().filter(|a| a.species == species && !a.dead).count()
    }

    /// Next id that would be handed out
    pub fn peek_next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }
}
