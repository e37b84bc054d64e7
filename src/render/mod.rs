//! Render-facing view of the reef
//!
//! This module is READ-ONLY - it never modifies simulation state. Live
//! agents and reconstructed records are flattened into the same
//! `RenderAgent` so a front end draws both modes identically.

pub mod colors;

use crate::core::types::{AgentId, Species, Vec2};
use crate::entity::agent::Agent;
use crate::entity::shape::ShapeData;
use crate::history::snapshot::AgentRecord;
use colors::{species_color, Color};

/// Faintest an agent is drawn, however sick
pub const MIN_OPACITY: f32 = 0.3;

/// Everything a renderer needs to draw one agent
#[derive(Debug, Clone, PartialEq)]
pub struct RenderAgent {
    pub id: AgentId,
    pub species: Species,
    pub position: Vec2,
    pub angle: f32,
    /// In [0, max_health]
    pub health: f32,
    pub size: f32,
    /// Fades with health down to `MIN_OPACITY`
    pub opacity: f32,
    pub color: Color,
    pub shape: ShapeData,
}

/// Draw opacity for an agent at `health`
pub fn opacity(health: f32, max_health: f32) -> f32 {
    (health / max_health).clamp(MIN_OPACITY, 1.0)
}

impl RenderAgent {
    pub fn from_record(record: &AgentRecord, max_health: f32) -> Self {
        let opacity = opacity(record.health, max_health);
        Self {
            id: record.id,
            species: record.species,
            position: record.position,
            angle: record.angle,
            health: record.health,
            size: record.size,
            opacity,
            color: species_color(record.species).with_alpha(opacity),
            shape: record.shape.clone(),
        }
    }

    pub fn from_agent(agent: &Agent, max_health: f32) -> Self {
        Self::from_record(&AgentRecord::from(agent), max_health)
    }
}

/// Collects the live agents into a reusable buffer, skipping the dead.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_agents(agents: &[Agent], max_health: f32, buffer: &mut Vec<RenderAgent>) {
    buffer.clear();
    buffer.extend(
        agents
            .iter()
            .filter(|a| !a.dead)
            .map(|a| RenderAgent::from_agent(a, max_health)),
    );
}

/// Same as `collect_render_agents` for a reconstructed review frame
pub fn collect_render_records(records: &[AgentRecord], max_health: f32, buffer: &mut Vec<RenderAgent>) {
    buffer.clear();
    buffer.extend(records.iter().map(|r| RenderAgent::from_record(r, max_health)));
}
