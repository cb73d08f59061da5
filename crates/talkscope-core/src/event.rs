//! Typed dashboard events and the FIFO bus that carries them.

use crate::filter::{DurationRange, OccupationPath};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A tag reference as emitted by a chart: catalog rank or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagRef {
    Index(usize),
    Name(String),
}

impl From<usize> for TagRef {
    fn from(value: usize) -> Self {
        TagRef::Index(value)
    }
}

impl From<&str> for TagRef {
    fn from(value: &str) -> Self {
        TagRef::Name(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DashboardEvent {
    /// A tag was clicked; toggling and capacity are resolved by the coordinator.
    TagClicked { tag: TagRef },
    TagSelectionChanged { tags: Vec<String> },
    OccupationFocusChanged { path: OccupationPath },
    DurationChanged { range: DurationRange },
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::TagClicked { .. } => "tag-clicked",
            DashboardEvent::TagSelectionChanged { .. } => "tag-selection-changed",
            DashboardEvent::OccupationFocusChanged { .. } => "occupation-focus-changed",
            DashboardEvent::DurationChanged { .. } => "duration-changed",
        }
    }
}

/// Events published while another event is being handled run after it, in publish order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    queue: VecDeque<DashboardEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: DashboardEvent) {
        self.queue.push_back(event);
    }

    pub fn pop(&mut self) -> Option<DashboardEvent> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
