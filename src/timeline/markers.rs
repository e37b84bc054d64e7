//! Labeled points on the timeline
//!
//! Markers annotate notable moments (the start, operator edits, branch
//! points) for display alongside the scrubber.

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub id: u32,
    pub time: SimTime,
    pub label: String,
}

/// Markers in insertion order, which is also time order
#[derive(Debug, Clone, Default)]
pub struct TimelineMarkers {
    markers: Vec<TimelineMarker>,
    next_marker_id: u32,
}

impl TimelineMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time: SimTime, label: impl Into<String>) -> u32 {
        let id = self.next_marker_id;
        self.next_marker_id += 1;
        self.markers.push(TimelineMarker {
            id,
            time,
            label: label.into(),
        });
        id
    }

    /// Drop markers strictly after `time`; one exactly at it survives
    pub fn truncate_after(&mut self, time: SimTime) -> usize {
        let before = self.markers.len();
        self.markers.retain(|m| m.time <= time);
        before - self.markers.len()
    }

    pub fn between(&self, from: SimTime, to: SimTime) -> impl Iterator<Item = &TimelineMarker> {
        self.markers.iter().filter(move |m| m.time >= from && m.time <= to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineMarker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}
