//! Session selection state. Only the coordinator mutates it.

use crate::filter::{DurationRange, OccupationPath};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToggle {
    Added,
    Removed,
    /// Added after evicting the oldest selected tag.
    AddedWithEviction { evicted: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    bounds: DurationRange,
    duration: DurationRange,
    tags: Vec<String>,
    path: OccupationPath,
    max_tags: usize,
}

impl SelectionState {
    pub fn new(bounds: DurationRange, max_tags: usize) -> Self {
        Self {
            bounds,
            duration: bounds,
            tags: Vec::new(),
            path: OccupationPath::root(),
            max_tags: max_tags.max(1),
        }
    }

    pub fn bounds(&self) -> DurationRange {
        self.bounds
    }

    pub fn duration(&self) -> DurationRange {
        self.duration
    }

    /// Selected tags in selection order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn path(&self) -> &OccupationPath {
        &self.path
    }

    pub fn max_tags(&self) -> usize {
        self.max_tags
    }

    /// Clicking a selected tag removes it; clicking a new one appends it, evicting the oldest
    /// selection first when already at capacity.
    pub fn toggle_tag(&mut self, tag: &str) -> TagToggle {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            return TagToggle::Removed;
        }
        let evicted = if self.tags.len() >= self.max_tags {
            Some(self.tags.remove(0))
        } else {
            None
        };
        self.tags.push(tag.to_string());
        match evicted {
            Some(evicted) => TagToggle::AddedWithEviction { evicted },
            None => TagToggle::Added,
        }
    }

    /// Replaces the selection. Duplicates are dropped; past capacity the most recent entries win.
    pub fn set_tags(&mut self, tags: &[String]) {
        self.tags.clear();
        for tag in tags {
            if self.tags.contains(tag) {
                continue;
            }
            if self.tags.len() >= self.max_tags {
                self.tags.remove(0);
            }
            self.tags.push(tag.clone());
        }
    }

    /// Moves the lower bound. Values are clamped to the data bounds and never pass `max`.
    pub fn set_duration_min(&mut self, min: u32) -> bool {
        let min = self.bounds.clamp_value(min).min(self.duration.max);
        self.replace_duration(DurationRange {
            min,
            max: self.duration.max,
        })
    }

    /// Moves the upper bound. Values are clamped to the data bounds and never pass `min`.
    pub fn set_duration_max(&mut self, max: u32) -> bool {
        let max = self.bounds.clamp_value(max).max(self.duration.min);
        self.replace_duration(DurationRange {
            min: self.duration.min,
            max,
        })
    }

    /// Sets both bounds at once; an inverted pair clamps `min` down to `max`.
    pub fn set_duration(&mut self, min: u32, max: u32) -> bool {
        let max = self.bounds.clamp_value(max);
        let min = self.bounds.clamp_value(min).min(max);
        self.replace_duration(DurationRange { min, max })
    }

    fn replace_duration(&mut self, next: DurationRange) -> bool {
        let changed = next != self.duration;
        self.duration = next;
        changed
    }

    pub fn set_path(&mut self, path: OccupationPath) -> bool {
        let changed = path != self.path;
        self.path = path;
        changed
    }
}
