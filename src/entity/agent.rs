//! The agent: the only mutable simulation entity

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, Species, Vec2};
use crate::entity::shape::ShapeData;

/// Species-specific transient counters
///
/// Part of every snapshot record so a resumed timeline continues exactly
/// where the recorded one left off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorTimers {
    /// Ticks until the agent may breed again
    pub reproduction_cooldown: f32,
    /// Ticks spent resting at the current shelter
    pub shelter_timer: u32,
    /// Ticks until shelter is sought again
    pub shelter_cooldown: u32,
    /// Shelter used most recently; skipped when choosing the next one
    pub last_shelter: Option<AgentId>,
    /// Shelter currently being approached or rested at
    pub current_shelter: Option<AgentId>,
}

impl BehaviorTimers {
    /// Forget any shelter in progress (fleeing overrides resting)
    pub fn abandon_shelter(&mut self) {
        self.shelter_timer = 0;
        self.current_shelter = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub species: Species,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing in radians; latched while speed is below the angle threshold
    pub angle: f32,
    /// Always within [0, max_health] after a behavior step
    pub health: f32,
    /// Body radius, fixed at creation
    pub size: f32,
    /// Set during a tick, the agent is removed when the tick compacts
    pub dead: bool,
    pub timers: BehaviorTimers,
    pub shape: ShapeData,
}

impl Agent {
    /// Create a fresh agent with randomized heading, size and shape
    pub fn spawn<R: Rng + ?Sized>(
        id: AgentId,
        species: Species,
        position: Vec2,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let body = config.species.body(species);
        let rules = &config.species.reproduction;

        let velocity = if species.is_mobile() {
            Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        } else {
            Vec2::ZERO
        };

        let size = if body.size_jitter > 0.0 {
            body.size + rng.gen::<f32>() * body.size_jitter
        } else {
            body.size
        };

        let reproduction_cooldown = if rules.initial_cooldown_max > rules.initial_cooldown_min {
            rng.gen_range(rules.initial_cooldown_min..rules.initial_cooldown_max)
        } else {
            rules.initial_cooldown_min
        };

        Self {
            id,
            species,
            position,
            velocity,
            angle: velocity.angle(),
            health: config.ecology.max_health,
            size,
            dead: false,
            timers: BehaviorTimers {
                reproduction_cooldown,
                ..BehaviorTimers::default()
            },
            shape: ShapeData::generate(species, size, rng),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
