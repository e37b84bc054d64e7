//! Per-species head counts

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Species;
use crate::entity::agent::Agent;
use crate::history::snapshot::AgentRecord;

/// Live agents per species
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Census {
    counts: AHashMap<Species, usize>,
}

impl Census {
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self::tally(agents.iter().filter(|a| !a.dead).map(|a| a.species))
    }

    pub fn from_records(records: &[AgentRecord]) -> Self {
        Self::tally(records.iter().map(|r| r.species))
    }

    fn tally(species: impl Iterator<Item = Species>) -> Self {
        let mut counts = AHashMap::new();
        for s in species {
            *counts.entry(s).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, species: Species) -> usize {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// One-line summary in species order, e.g. `shark 2, fish 15, ...`
    pub fn summary(&self) -> String {
        Species::ALL
            .iter()
            .map(|&s| format!("{} {}", s, self.count(s)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
