//! Time-ordered snapshot store

use crate::core::environment::Environment;
use crate::core::error::{ReefError, Result};
use crate::core::types::SimTime;
use crate::entity::agent::Agent;
use crate::history::snapshot::WorldSnapshot;

/// The pair of snapshots surrounding a query time
#[derive(Debug, Clone, Copy)]
pub enum Bracket<'a> {
    /// Query at or outside the recorded range, or exactly on a snapshot
    Single(&'a WorldSnapshot),
    /// `a.time <= t < b.time`
    Between(&'a WorldSnapshot, &'a WorldSnapshot),
}

/// Snapshots sorted by non-decreasing time
///
/// Equal times are allowed (an operator edit re-records the current
/// instant); lookups at such a time resolve to the latest entry.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    snapshots: Vec<WorldSnapshot>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, rejecting one earlier than the current head
    pub fn push(&mut self, snapshot: WorldSnapshot) -> Result<()> {
        let last = self.live_head();
        if !self.snapshots.is_empty() && snapshot.time < last {
            return Err(ReefError::HistoryOutOfOrder {
                recorded: snapshot.time,
                last,
            });
        }
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Capture `agents` at `time` and append
    pub fn record(&mut self, time: SimTime, environment: Environment, agents: &[Agent]) -> Result<()> {
        self.push(WorldSnapshot::capture(time, environment, agents))
    }

    /// Time of the latest snapshot, zero when empty
    pub fn live_head(&self) -> SimTime {
        self.snapshots.last().map(|s| s.time).unwrap_or(0.0)
    }

    pub fn latest(&self) -> Option<&WorldSnapshot> {
        self.snapshots.last()
    }

    /// Find the snapshots surrounding `t`
    ///
    /// Before the first snapshot this is the first one, at or after the
    /// last it is the last one. `None` only when the store is empty.
    pub fn bracket(&self, t: SimTime) -> Option<Bracket<'_>> {
        let first = self.snapshots.first()?;

        // Index of the first snapshot strictly after t
        let upper = self.snapshots.partition_point(|s| s.time <= t);
        if upper == 0 {
            return Some(Bracket::Single(first));
        }
        let a = &self.snapshots[upper - 1];
        match self.snapshots.get(upper) {
            Some(b) if a.time < t => Some(Bracket::Between(a, b)),
            _ => Some(Bracket::Single(a)),
        }
    }

    /// Drop every snapshot at or after `t`, returning how many went
    pub fn truncate_from(&mut self, t: SimTime) -> usize {
        let keep = self.snapshots.partition_point(|s| s.time < t);
        let removed = self.snapshots.len() - keep;
        self.snapshots.truncate(keep);
        removed
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldSnapshot> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(times: &[SimTime]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for &t in times {
            store.record(t, Environment::default(), &[]).unwrap();
        }
        store
    }

    fn times(bracket: Option<Bracket<'_>>) -> (SimTime, Option<SimTime>) {
        match bracket {
            Some(Bracket::Single(a)) => (a.time, None),
            Some(Bracket::Between(a, b)) => (a.time, Some(b.time)),
            None => panic!("empty store"),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = HistoryStore::new();
        assert!(store.bracket(1.0).is_none());
        assert_eq!(store.live_head(), 0.0);
    }

    #[test]
    fn test_rejects_out_of_order() {
        let mut store = store(&[0.0, 1.0, 2.0]);
        let err = store.record(1.5, Environment::default(), &[]).unwrap_err();
        assert!(matches!(err, ReefError::HistoryOutOfOrder { .. }));
        assert_eq!(store.len(), 3);
        // Equal time is fine
        assert!(store.record(2.0, Environment::default(), &[]).is_ok());
    }

    #[test]
    fn test_bracket_cases() {
        let store = store(&[0.0, 1.0, 2.0]);
        assert_eq!(times(store.bracket(-3.0)), (0.0, None));
        assert_eq!(times(store.bracket(0.0)), (0.0, None));
        assert_eq!(times(store.bracket(0.25)), (0.0, Some(1.0)));
        assert_eq!(times(store.bracket(1.0)), (1.0, None));
        assert_eq!(times(store.bracket(1.99)), (1.0, Some(2.0)));
        assert_eq!(times(store.bracket(2.0)), (2.0, None));
        assert_eq!(times(store.bracket(50.0)), (2.0, None));
    }

    #[test]
    fn test_duplicate_time_resolves_to_latest() {
        let mut store = HistoryStore::new();
        store.record(0.0, Environment::default(), &[]).unwrap();
        store.record(1.0, Environment::new(20.0, 0.0), &[]).unwrap();
        store.record(1.0, Environment::new(30.0, 0.0), &[]).unwrap();
        store.record(2.0, Environment::default(), &[]).unwrap();

        match store.bracket(1.0) {
            Some(Bracket::Single(s)) => assert_eq!(s.environment.temperature, 30.0),
            _ => panic!("expected a single snapshot"),
        }
        match store.bracket(1.5) {
            Some(Bracket::Between(a, _)) => assert_eq!(a.environment.temperature, 30.0),
            _ => panic!("expected a pair"),
        }
    }

    #[test]
    fn test_truncate_from() {
        let mut store = store(&[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(store.truncate_from(1.5), 2);
        assert_eq!(store.live_head(), 1.0);

        // Boundary snapshot itself goes
        assert_eq!(store.truncate_from(1.0), 1);
        assert_eq!(store.live_head(), 0.0);
        assert_eq!(store.len(), 1);
    }
}
