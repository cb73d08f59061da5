//! The filter composer.
//!
//! Two stages over the full record set:
//! 1. duration + tag stage ([`duration_tag_stage`]): inclusive duration window, then (when tags
//!    are selected) "has any selected tag";
//! 2. occupation stage ([`occupation_stage`]): exact match on the first `depth` levels of the
//!    occupation path.
//!
//! The chord view ([`chord_view`]) is duration + occupation and deliberately never applies the tag
//! predicate: the co-occurrence matrix is what tags are picked from.

use crate::record::{OccupationLevel, TalkRecord};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    /// Builds a range; an inverted pair collapses `min` onto `max`.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max,
        }
    }

    pub fn contains(&self, duration: u32) -> bool {
        self.min <= duration && duration <= self.max
    }

    pub fn clamp_value(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Parses `min:max` (either side may be `..`-separated too).
    pub fn parse(text: &str) -> Option<Self> {
        let (a, b) = text.split_once(':').or_else(|| text.split_once(".."))?;
        Some(Self::new(a.trim().parse().ok()?, b.trim().parse().ok()?))
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} min", self.min, self.max)
    }
}

/// Zoom focus in the occupation hierarchy: 0 (root) to 3 levels, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupationPath(Vec<String>);

impl OccupationPath {
    pub const MAX_DEPTH: usize = 3;

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Result<Self> {
        let segments = segments.into_iter().map(Into::into).collect::<Vec<String>>();
        if segments.len() > Self::MAX_DEPTH {
            return Err(Error::UnknownOccupation {
                path: segments.join("/"),
            });
        }
        Ok(Self(segments))
    }

    /// Parses `Broader/Categorized/Speaker`; an empty string is the root.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() || text == "/" {
            return Ok(Self::root());
        }
        Self::new(text.split('/').map(str::trim))
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn prefix(&self, depth: usize) -> Self {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    pub fn matches(&self, record: &TalkRecord) -> bool {
        self.0
            .iter()
            .zip(OccupationLevel::ALL)
            .all(|(segment, level)| record.occupation(level) == segment)
    }
}

impl fmt::Display for OccupationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join("/"))
    }
}

pub fn duration_stage<'a>(records: &'a [TalkRecord], range: &DurationRange) -> Vec<&'a TalkRecord> {
    records.iter().filter(|r| range.contains(r.duration)).collect()
}

pub fn duration_tag_stage<'a>(
    records: &'a [TalkRecord],
    range: &DurationRange,
    selected_tags: &[String],
) -> Vec<&'a TalkRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.duration))
        .filter(|r| selected_tags.is_empty() || r.has_any_tag(selected_tags))
        .collect()
}

pub fn occupation_stage<'a>(
    records: &[&'a TalkRecord],
    path: &OccupationPath,
) -> Vec<&'a TalkRecord> {
    if path.is_root() {
        return records.to_vec();
    }
    records.iter().copied().filter(|r| path.matches(r)).collect()
}

/// Records behind the co-occurrence matrix: duration + occupation, no tag predicate.
pub fn chord_view<'a>(
    records: &'a [TalkRecord],
    range: &DurationRange,
    path: &OccupationPath,
) -> Vec<&'a TalkRecord> {
    occupation_stage(&duration_stage(records, range), path)
}

/// The longest prefix of `path` matched by at least one of `records` (possibly the root).
pub fn surviving_prefix(records: &[&TalkRecord], path: &OccupationPath) -> OccupationPath {
    (0..=path.depth())
        .rev()
        .map(|depth| path.prefix(depth))
        .find(|prefix| prefix.is_root() || records.iter().any(|r| prefix.matches(r)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_collapses_onto_max() {
        assert_eq!(DurationRange::new(30, 10), DurationRange { min: 10, max: 10 });
    }

    #[test]
    fn range_parses_colon_and_dots() {
        assert_eq!(DurationRange::parse("5:40"), Some(DurationRange::new(5, 40)));
        assert_eq!(DurationRange::parse("5..40"), Some(DurationRange::new(5, 40)));
        assert_eq!(DurationRange::parse("five"), None);
    }

    #[test]
    fn path_rejects_more_than_three_levels() {
        assert!(OccupationPath::new(["a", "b", "c", "d"]).is_err());
        assert_eq!(OccupationPath::parse("").unwrap().depth(), 0);
        assert_eq!(OccupationPath::parse("Science/ Biologist").unwrap().depth(), 2);
        assert_eq!(
            OccupationPath::new(["a", "b"]).unwrap().to_string(),
            "a/b"
        );
    }
}
