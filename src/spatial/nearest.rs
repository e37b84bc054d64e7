//! Nearest-neighbor sensing
//!
//! A single linear scan over the agent slice. The reef holds tens to a few
//! hundred agents, where a scan beats maintaining a hash grid that would
//! need rebuilding every tick as everything moves.

use crate::core::types::{AgentId, Species};
use crate::entity::agent::Agent;

/// Result of a nearest query
///
/// `index` points into the slice that was searched. When nothing
/// qualifies, `index` is `None` and `distance` is infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub index: Option<usize>,
    pub distance: f32,
}

impl Nearest {
    pub const NONE: Nearest = Nearest {
        index: None,
        distance: f32::INFINITY,
    };

    pub fn found(&self) -> Option<(usize, f32)> {
        self.index.map(|idx| (idx, self.distance))
    }
}

/// Find the closest live agent of `target` species as seen from `agents[origin]`
///
/// Skips the origin itself, dead agents, other species and `exclude`.
/// Only matches strictly inside `vision` count; `None` means unbounded.
/// Ties go to the first agent in slice order.
pub fn nearest(
    origin: usize,
    agents: &[Agent],
    target: Species,
    vision: Option<f32>,
    exclude: Option<AgentId>,
) -> Nearest {
    let Some(observer) = agents.get(origin) else {
        return Nearest::NONE;
    };
    let limit = vision.unwrap_or(f32::INFINITY);

    let mut best = Nearest::NONE;
    for (idx, other) in agents.iter().enumerate() {
        if idx == origin || other.dead || other.species != target {
            continue;
        }
        if exclude == Some(other.id) {
            continue;
        }

        let distance = observer.position.distance(&other.position);
        if distance < best.distance && distance < limit {
            best = Nearest {
                index: Some(idx),
                distance,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::agent::BehaviorTimers;
    use crate::entity::shape::ShapeData;

    fn agent(id: u64, species: Species, x: f32, y: f32) -> Agent {
        Agent {
            id: AgentId(id),
            species,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            angle: 0.0,
            health: 100.0,
            size: 10.0,
            dead: false,
            timers: BehaviorTimers::default(),
            shape: ShapeData::Plain,
        }
    }

    #[test]
    fn test_finds_closest_of_species() {
        let agents = vec![
            agent(1, Species::Shark, 0.0, 0.0),
            agent(2, Species::Fish, 50.0, 0.0),
            agent(3, Species::Fish, 20.0, 0.0),
            agent(4, Species::Shrimp, 5.0, 0.0),
        ];
        let hit = nearest(0, &agents, Species::Fish, Some(350.0), None);
        assert_eq!(hit.found(), Some((2, 20.0)));
    }

    #[test]
    fn test_skips_self_dead_and_excluded() {
        let mut agents = vec![
            agent(1, Species::Fish, 0.0, 0.0),
            agent(2, Species::Fish, 10.0, 0.0),
            agent(3, Species::Fish, 20.0, 0.0),
            agent(4, Species::Fish, 30.0, 0.0),
        ];
        agents[1].dead = true;

        let hit = nearest(0, &agents, Species::Fish, None, Some(AgentId(3)));
        assert_eq!(hit.index, Some(3));
    }

    #[test]
    fn test_vision_is_strict_bound() {
        let agents = vec![agent(1, Species::Fish, 0.0, 0.0), agent(2, Species::Coral, 180.0, 0.0)];
        assert_eq!(nearest(0, &agents, Species::Coral, Some(180.0), None), Nearest::NONE);
        assert_eq!(nearest(0, &agents, Species::Coral, Some(180.5), None).index, Some(1));
        // Unbounded vision for stationary observers
        assert_eq!(nearest(0, &agents, Species::Coral, None, None).index, Some(1));
    }

    #[test]
    fn test_no_match_sentinel() {
        let agents = vec![agent(1, Species::Shark, 0.0, 0.0)];
        let miss = nearest(0, &agents, Species::Fish, Some(100.0), None);
        assert!(miss.index.is_none());
        assert!(miss.distance.is_infinite());
        assert_eq!(nearest(9, &agents, Species::Shark, None, None), Nearest::NONE);
    }

    #[test]
    fn test_tie_goes_to_first_in_order() {
        let agents = vec![
            agent(1, Species::Shark, 0.0, 0.0),
            agent(2, Species::Fish, 10.0, 0.0),
            agent(3, Species::Fish, -10.0, 0.0),
        ];
        assert_eq!(nearest(0, &agents, Species::Fish, None, None).index, Some(1));
    }
}
