//! Motion epilogue shared by every species
//!
//! Runs after the species rule and reproduction: speed cap, position
//! integration, facing update and boundary reflection.

use crate::core::config::{BodyParams, EcologyConfig};
use crate::core::types::{Bounds, Vec2};
use crate::entity::agent::Agent;

/// Accelerate `agent` toward `target`, `distance` being their separation
///
/// Zero separation has no direction and leaves the velocity alone.
pub fn steer_toward(agent: &mut Agent, target: Vec2, distance: f32, accel: f32) {
    if distance > 0.0 {
        agent.velocity += (target - agent.position) * (accel / distance);
    }
}

/// Accelerate `agent` directly away from `threat`
pub fn steer_away(agent: &mut Agent, threat: Vec2, distance: f32, accel: f32) {
    if distance > 0.0 {
        agent.velocity += (agent.position - threat) * (accel / distance);
    }
}

/// Integrate one tick of motion
///
/// Species with a zero speed cap skip the cap but still integrate (their
/// velocity is zero) and still get clamped into the bounds.
pub fn integrate(agent: &mut Agent, body: &BodyParams, ecology: &EcologyConfig, bounds: Bounds) {
    let mut speed = agent.velocity.length();
    if body.max_speed > 0.0 && speed > body.max_speed {
        agent.velocity = agent.velocity * (body.max_speed / speed);
        speed = body.max_speed;
    }

    agent.position += agent.velocity;

    if speed > ecology.angle_speed_threshold {
        agent.angle = agent.velocity.angle();
    }

    reflect_at_bounds(agent, bounds);
}

/// Keep the whole body inside the world, bouncing off the edges
fn reflect_at_bounds(agent: &mut Agent, bounds: Bounds) {
    let margin = agent.size;

    if agent.position.x < margin {
        agent.position.x = margin;
        agent.velocity.x = agent.velocity.x.abs();
    } else if agent.position.x > bounds.width - margin {
        agent.position.x = bounds.width - margin;
        agent.velocity.x = -agent.velocity.x.abs();
    }

    if agent.position.y < margin {
        agent.position.y = margin;
        agent.velocity.y = agent.velocity.y.abs();
    } else if agent.position.y > bounds.height - margin {
        agent.position.y = bounds.height - margin;
        agent.velocity.y = -agent.velocity.y.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpeciesTable;
    use crate::core::types::{AgentId, Species};
    use crate::entity::agent::BehaviorTimers;
    use crate::entity::shape::ShapeData;
    use std::f32::consts::FRAC_PI_2;

    fn shark(pos: Vec2, vel: Vec2) -> Agent {
        Agent {
            id: AgentId(1),
            species: Species::Shark,
            position: pos,
            velocity: vel,
            angle: FRAC_PI_2,
            health: 100.0,
            size: 22.0,
            dead: false,
            timers: BehaviorTimers::default(),
            shape: ShapeData::Plain,
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(1280.0, 720.0)
    }

    #[test]
    fn test_speed_capped() {
        let table = SpeciesTable::default();
        let mut agent = shark(Vec2::new(500.0, 300.0), Vec2::new(9.0, 0.0));
        integrate(&mut agent, &table.shark.body, &EcologyConfig::default(), bounds());
        assert!((agent.speed() - 4.5).abs() < 1e-5);
        assert!((agent.position.x - 504.5).abs() < 1e-4);
        assert_eq!(agent.angle, 0.0);
    }

    #[test]
    fn test_slow_agent_keeps_angle() {
        let table = SpeciesTable::default();
        let mut agent = shark(Vec2::new(500.0, 300.0), Vec2::new(0.05, 0.0));
        integrate(&mut agent, &table.shark.body, &EcologyConfig::default(), bounds());
        assert_eq!(agent.angle, FRAC_PI_2);

        let mut still = shark(Vec2::new(500.0, 300.0), Vec2::ZERO);
        integrate(&mut still, &table.shark.body, &EcologyConfig::default(), bounds());
        assert_eq!(still.angle, FRAC_PI_2);
        assert_eq!(still.position, Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_reflects_at_edges() {
        let table = SpeciesTable::default();
        let mut agent = shark(Vec2::new(23.0, 700.0), Vec2::new(-3.0, 3.0));
        integrate(&mut agent, &table.shark.body, &EcologyConfig::default(), bounds());
        assert_eq!(agent.position, Vec2::new(22.0, 720.0 - 22.0));
        assert_eq!(agent.velocity, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_steering_toward_and_away() {
        let mut agent = shark(Vec2::ZERO, Vec2::ZERO);
        steer_toward(&mut agent, Vec2::new(10.0, 0.0), 10.0, 0.3);
        assert!((agent.velocity.x - 0.3).abs() < 1e-6);

        steer_away(&mut agent, Vec2::new(0.0, 5.0), 5.0, 0.9);
        assert!((agent.velocity.y + 0.9).abs() < 1e-6);

        // Coincident positions give no direction
        let before = agent.velocity;
        steer_toward(&mut agent, Vec2::ZERO, 0.0, 1.0);
        assert_eq!(agent.velocity, before);
    }
}
