//! Operator's agent selection
//!
//! Holds an id, never a reference: the selected agent is looked up again
//! in whatever set is on display each frame, live or reconstructed.

use crate::core::types::{AgentId, Vec2};
use crate::render::RenderAgent;

/// Pick radius as a multiple of body size
pub const HIT_RADIUS_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<AgentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<AgentId> {
        self.selected
    }

    pub fn select(&mut self, id: AgentId) {
        self.selected = Some(id);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn toggle_select(&mut self, id: AgentId) {
        if self.selected == Some(id) {
            self.deselect();
        } else {
            self.select(id);
        }
    }

    /// Re-check the selection against the displayed set
    ///
    /// Clears it and returns the lost id when `present` says the agent is
    /// not on display any more.
    pub fn resolve(&mut self, present: impl Fn(AgentId) -> bool) -> Option<AgentId> {
        let id = self.selected?;
        if present(id) {
            return None;
        }
        self.selected = None;
        Some(id)
    }
}

/// Topmost agent whose pick radius contains `point`
///
/// Later agents draw over earlier ones, so the scan runs back to front.
pub fn hit_test(displayed: &[RenderAgent], point: Vec2) -> Option<AgentId> {
    displayed
        .iter()
        .rev()
        .find(|r| r.position.distance(&point) < r.size * HIT_RADIUS_FACTOR)
        .map(|r| r.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Species;
    use crate::entity::agent::BehaviorTimers;
    use crate::entity::shape::ShapeData;
    use crate::history::snapshot::AgentRecord;

    fn shown(id: u64, x: f32, size: f32) -> RenderAgent {
        let record = AgentRecord {
            id: AgentId(id),
            species: Species::Coral,
            position: Vec2::new(x, 0.0),
            velocity: Vec2::ZERO,
            angle: 0.0,
            health: 100.0,
            size,
            timers: BehaviorTimers::default(),
            shape: ShapeData::Plain,
        };
        RenderAgent::from_record(&record, 100.0)
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let displayed = vec![shown(1, 0.0, 20.0), shown(2, 10.0, 10.0)];
        assert_eq!(hit_test(&displayed, Vec2::new(5.0, 0.0)), Some(AgentId(2)));
        // 28 is inside 1.5 * 20 of the first but outside the second
        assert_eq!(hit_test(&displayed, Vec2::new(-28.0, 0.0)), Some(AgentId(1)));
        assert_eq!(hit_test(&displayed, Vec2::new(100.0, 0.0)), None);
    }

    #[test]
    fn test_resolve_clears_missing() {
        let mut selection = Selection::new();
        assert_eq!(selection.resolve(|_| false), None);

        selection.select(AgentId(1));
        assert_eq!(selection.resolve(|id| id == AgentId(1)), None);
        assert_eq!(selection.selected(), Some(AgentId(1)));

        assert_eq!(selection.resolve(|id| id == AgentId(2)), Some(AgentId(1)));
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        selection.toggle_select(AgentId(3));
        assert_eq!(selection.selected(), Some(AgentId(3)));
        selection.toggle_select(AgentId(3));
        assert_eq!(selection.selected(), None);
    }
}
