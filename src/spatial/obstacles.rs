//! Static terrain obstacles: a filtered projection of the live agent set

use serde::{Deserialize, Serialize};

use crate::core::config::EcologyConfig;
use crate::core::types::{AgentId, Vec2};
use crate::entity::agent::Agent;

/// Position and radius of one live obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFootprint {
    pub id: AgentId,
    pub position: Vec2,
    pub size: f32,
}

/// Every live obstacle-species agent, in agent order
pub fn obstacle_footprints(agents: &[Agent]) -> Vec<ObstacleFootprint> {
    agents
        .iter()
        .filter(|a| a.species.is_obstacle() && !a.dead)
        .map(|a| ObstacleFootprint {
            id: a.id,
            position: a.position,
            size: a.size,
        })
        .collect()
}

/// Push `agent` out of any obstacle it overlaps and bounce its velocity
///
/// Contact distance is the agent's radius plus the solid fraction of the
/// obstacle's radius. The agent moves out along the separating normal by
/// the overlap, and its velocity is reflected about that normal and damped.
/// Returns the number of obstacles hit.
pub fn resolve_obstacle_contacts(
    agent: &mut Agent,
    obstacles: &[ObstacleFootprint],
    ecology: &EcologyConfig,
) -> usize {
    let mut hits = 0;
    for obstacle in obstacles {
        if obstacle.id == agent.id {
            continue;
        }

        let offset = agent.position - obstacle.position;
        let dist = offset.length();
        let min_dist = agent.size + obstacle.size * ecology.obstacle_contact_factor;
        if dist >= min_dist {
            continue;
        }

        // Exactly centered: any normal separates, pick +x
        let normal = if dist > f32::EPSILON {
            offset * (1.0 / dist)
        } else {
            Vec2::new(1.0, 0.0)
        };

        agent.position += normal * (min_dist - dist);
        let dot = agent.velocity.dot(&normal);
        agent.velocity = (agent.velocity - normal * (2.0 * dot)) * ecology.bounce_damping;
        hits += 1;
    }
    hits
}
