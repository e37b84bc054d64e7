//! Notifications from the controller to whatever front end drives it

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::environment::EnvironmentParam;
use crate::core::types::{AgentId, SimTime, Species};
use crate::world::Scenario;

/// Maximum notices a `NoticeLog` keeps
const MAX_LOG_ENTRIES: usize = 50;

/// Something the operator should be told about
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Entered or moved within review mode
    Rewound { time: SimTime },
    /// Back at the live head
    Live,
    /// History was cut at `time` and simulation resumed from there
    Branched { time: SimTime, discarded: usize },
    /// An edit was refused
    Rejected { reason: String },
    EnvironmentChanged { param: EnvironmentParam, value: f32 },
    /// The selected agent is not in the displayed set any more
    SelectionLost { id: AgentId },
    Reset { scenario: Scenario },
}

/// Receiver for controller notifications
///
/// Every method defaults to doing nothing.
pub trait TimelineObserver {
    fn notice(&mut self, _notice: &Notice) {}

    /// An agent left the live world (eaten, starved or otherwise dead)
    fn agent_removed(&mut self, _id: AgentId, _species: Species) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NullObserver;

impl TimelineObserver for NullObserver {}

/// Bounded log of recent notices, shareable with the code that displays it
///
/// Clones share one buffer, so a front end can keep a handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    entries: Rc<RefCell<VecDeque<Notice>>>,
    removed: Rc<RefCell<VecDeque<(AgentId, Species)>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the logged notices, oldest first
    pub fn notices(&self) -> Vec<Notice> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Removals reported since the last call, at most the newest
    /// `MAX_LOG_ENTRIES`
    pub fn drain_removed(&self) -> Vec<(AgentId, Species)> {
        self.removed.borrow_mut().drain(..).collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.removed.borrow_mut().clear();
    }
}

impl TimelineObserver for NoticeLog {
    fn notice(&mut self, notice: &Notice) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(notice.clone());
    }

    fn agent_removed(&mut self, id: AgentId, species: Species) {
        let mut removed = self.removed.borrow_mut();
        if removed.len() >= MAX_LOG_ENTRIES {
            removed.pop_front();
        }
        removed.push_back((id, species));
    }
}
