//! Immutable copies of the world at one instant

use serde::{Deserialize, Serialize};

use crate::core::environment::Environment;
use crate::core::error::Result;
use crate::core::types::{AgentId, SimTime, Species, Vec2};
use crate::entity::agent::{Agent, BehaviorTimers};
use crate::entity::shape::ShapeData;

/// One agent as it stood when a snapshot was taken
///
/// Detached from the live agent: mutating the world afterwards never
/// changes a record. Timers ride along so a restored agent resumes its
/// cooldowns and shelter visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub species: Species,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub health: f32,
    pub size: f32,
    pub timers: BehaviorTimers,
    pub shape: ShapeData,
}

impl From<&Agent> for AgentRecord {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            species: agent.species,
            position: agent.position,
            velocity: agent.velocity,
            angle: agent.angle,
            health: agent.health,
            size: agent.size,
            timers: agent.timers.clone(),
            shape: agent.shape.clone(),
        }
    }
}

impl AgentRecord {
    /// Rebuild a live agent from this record
    pub fn to_agent(&self) -> Agent {
        Agent {
            id: self.id,
            species: self.species,
            position: self.position,
            velocity: self.velocity,
            angle: self.angle,
            health: self.health,
            size: self.size,
            dead: false,
            timers: self.timers.clone(),
            shape: self.shape.clone(),
        }
    }
}

/// The reef at one instant of simulated time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub environment: Environment,
    pub agents: Vec<AgentRecord>,
}

impl WorldSnapshot {
    /// Copy every live agent
    pub fn capture(time: SimTime, environment: Environment, agents: &[Agent]) -> Self {
        Self {
            time,
            environment,
            agents: agents.iter().filter(|a| !a.dead).map(AgentRecord::from).collect(),
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentRecord> {
        self.agents.iter().find(|r| r.id == id)
    }

    /// Rebuild the live agent set
    pub fn restore_agents(&self) -> Vec<Agent> {
        self.agents.iter().map(AgentRecord::to_agent).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agents() -> Vec<Agent> {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        [Species::Fish, Species::Coral, Species::Rock]
            .into_iter()
            .enumerate()
            .map(|(i, s)| Agent::spawn(AgentId(i as u64 + 1), s, Vec2::new(100.0, 100.0), &config, &mut rng))
            .collect()
    }

    #[test]
    fn test_capture_skips_dead_and_detaches() {
        let mut live = agents();
        live[1].dead = true;
        let snap = WorldSnapshot::capture(3.0, Environment::default(), &live);

        assert_eq!(snap.agents.len(), 2);
        assert!(snap.agent(AgentId(2)).is_none());

        live[0].position = Vec2::new(999.0, 999.0);
        assert_eq!(snap.agent(AgentId(1)).map(|r| r.position), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_restore_rebuilds_equal_agents() {
        let live = agents();
        let snap = WorldSnapshot::capture(0.0, Environment::default(), &live);
        assert_eq!(snap.restore_agents(), live);
    }

    #[test]
    fn test_json_export() {
        let snap = WorldSnapshot::capture(2.0, Environment::new(27.0, 5.0), &agents());
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"coral\""));
        assert_eq!(WorldSnapshot::from_json(&json).unwrap(), snap);
        assert!(WorldSnapshot::from_json("{").is_err());
    }
}
