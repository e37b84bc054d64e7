//! Reconstruct in-between states from two bracketing snapshots
//!
//! Rendering only: nothing here touches the live world.

use ahash::AHashMap;

use crate::core::environment::Environment;
use crate::core::types::{AgentId, SimTime};
use crate::history::snapshot::{AgentRecord, WorldSnapshot};
use crate::history::store::Bracket;

/// A displayable reef state at an arbitrary past time
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFrame {
    pub time: SimTime,
    /// Taken from the earlier snapshot; environment is a step function
    pub environment: Environment,
    pub agents: Vec<AgentRecord>,
}

/// Fraction of the way from `a` to `b` that `t` lies, clamped to [0, 1]
pub fn interpolation_factor(a: SimTime, b: SimTime, t: SimTime) -> f32 {
    let span = b - a;
    if span <= 0.0 {
        return 0.0;
    }
    ((t - a) / span).clamp(0.0, 1.0) as f32
}

/// Blend every agent present in both snapshots
///
/// Position and velocity are linear in `u`. Facing follows the blended
/// velocity only above `angle_threshold`, otherwise `a`'s angle is kept.
/// Health, timers and shape come from `a` unchanged. Agents missing from
/// `b` died in between and are left out.
pub fn interpolate(a: &WorldSnapshot, b: &WorldSnapshot, t: SimTime, angle_threshold: f32) -> Vec<AgentRecord> {
    let u = interpolation_factor(a.time, b.time, t);
    let later: AHashMap<AgentId, &AgentRecord> = b.agents.iter().map(|r| (r.id, r)).collect();

    a.agents
        .iter()
        .filter_map(|from| {
            let to = later.get(&from.id)?;
            let velocity = from.velocity.lerp(&to.velocity, u);
            let angle = if velocity.length() > angle_threshold {
                velocity.angle()
            } else {
                from.angle
            };
            Some(AgentRecord {
                position: from.position.lerp(&to.position, u),
                velocity,
                angle,
                ..from.clone()
            })
        })
        .collect()
}

/// Build the review frame for `t` from its bracket
pub fn reconstruct(bracket: Bracket<'_>, t: SimTime, angle_threshold: f32) -> ReviewFrame {
    match bracket {
        Bracket::Single(snapshot) => ReviewFrame {
            time: t,
            environment: snapshot.environment,
            agents: snapshot.agents.clone(),
        },
        Bracket::Between(a, b) => ReviewFrame {
            time: t,
            environment: a.environment,
            agents: interpolate(a, b, t, angle_threshold),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Species, Vec2};
    use crate::entity::agent::BehaviorTimers;
    use crate::entity::shape::ShapeData;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn record(id: u64, pos: Vec2, vel: Vec2, angle: f32, health: f32) -> AgentRecord {
        AgentRecord {
            id: AgentId(id),
            species: Species::Fish,
            position: pos,
            velocity: vel,
            angle,
            health,
            size: 12.0,
            timers: BehaviorTimers::default(),
            shape: ShapeData::Plain,
        }
    }

    fn snapshot(time: SimTime, agents: Vec<AgentRecord>) -> WorldSnapshot {
        WorldSnapshot {
            time,
            environment: Environment::new(time as f32 + 20.0, 0.0),
            agents,
        }
    }

    #[test]
    fn test_factor_clamped() {
        assert_eq!(interpolation_factor(1.0, 2.0, 1.5), 0.5);
        assert_eq!(interpolation_factor(1.0, 2.0, 0.0), 0.0);
        assert_eq!(interpolation_factor(1.0, 2.0, 9.0), 1.0);
        assert_eq!(interpolation_factor(2.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_midpoint_blend_takes_health_from_earlier() {
        let a = snapshot(0.0, vec![record(1, Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), 0.0, 80.0)]);
        let b = snapshot(1.0, vec![record(1, Vec2::new(10.0, 4.0), Vec2::new(0.0, 2.0), 1.0, 20.0)]);

        let mid = interpolate(&a, &b, 0.5, 0.1);

        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].position, Vec2::new(5.0, 2.0));
        assert_eq!(mid[0].velocity, Vec2::new(1.0, 1.0));
        assert!((mid[0].angle - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(mid[0].health, 80.0);
    }

    #[test]
    fn test_slow_blend_keeps_earlier_angle() {
        let a = snapshot(0.0, vec![record(1, Vec2::ZERO, Vec2::new(0.05, 0.0), FRAC_PI_2, 50.0)]);
        let b = snapshot(1.0, vec![record(1, Vec2::ZERO, Vec2::new(-0.05, 0.0), 3.0, 50.0)]);
        assert_eq!(interpolate(&a, &b, 0.5, 0.1)[0].angle, FRAC_PI_2);
    }

    #[test]
    fn test_dead_in_between_omitted() {
        let a = snapshot(0.0, vec![
            record(1, Vec2::ZERO, Vec2::ZERO, 0.0, 50.0),
            record(2, Vec2::ZERO, Vec2::ZERO, 0.0, 50.0),
        ]);
        let b = snapshot(1.0, vec![
            record(2, Vec2::ZERO, Vec2::ZERO, 0.0, 50.0),
            record(3, Vec2::ZERO, Vec2::ZERO, 0.0, 50.0),
        ]);
        let ids: Vec<_> = interpolate(&a, &b, 0.3, 0.1).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![AgentId(2)]);
    }

    #[test]
    fn test_reconstruct_uses_earlier_environment() {
        let a = snapshot(0.0, vec![]);
        let b = snapshot(1.0, vec![]);
        let frame = reconstruct(Bracket::Between(&a, &b), 0.9, 0.1);
        assert_eq!(frame.environment.temperature, 20.0);
        assert_eq!(frame.time, 0.9);

        let single = reconstruct(Bracket::Single(&b), 7.0, 0.1);
        assert_eq!(single.environment.temperature, 21.0);
    }

    proptest! {
        #[test]
        fn proptest_endpoints_reproduce_snapshots(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            avx in -5.0f32..5.0, avy in -5.0f32..5.0,
            bvx in -5.0f32..5.0, bvy in -5.0f32..5.0,
        ) {
            let a = snapshot(3.0, vec![record(1, Vec2::new(ax, ay), Vec2::new(avx, avy), 0.0, 50.0)]);
            let b = snapshot(4.0, vec![record(1, Vec2::new(bx, by), Vec2::new(bvx, bvy), 0.0, 50.0)]);

            let start = &interpolate(&a, &b, 3.0, 0.1)[0];
            prop_assert_eq!(start.position, a.agents[0].position);
            prop_assert_eq!(start.velocity, a.agents[0].velocity);

            let end = &interpolate(&a, &b, 4.0, 0.1)[0];
            prop_assert_eq!(end.position, b.agents[0].position);
            prop_assert_eq!(end.velocity, b.agents[0].velocity);
        }
    }
}
