//! The typed talk record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Occupation hierarchy levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupationLevel {
    Broader,
    Categorized,
    Speaker,
}

impl OccupationLevel {
    pub const ALL: [OccupationLevel; 3] = [
        OccupationLevel::Broader,
        OccupationLevel::Categorized,
        OccupationLevel::Speaker,
    ];
}

/// One talk. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRecord {
    pub id: u64,
    pub headline: String,
    pub speaker_1: String,
    pub speaker1_occupation: String,
    pub occupation_categorized: String,
    pub occupation_broader: String,
    pub views: u64,
    /// Minutes.
    pub duration: u32,
    pub published: NaiveDate,
    pub year: i32,
    /// Never empty; no duplicates.
    pub tags: Vec<String>,
    pub public_url: String,
}

impl TalkRecord {
    /// Creates a record with the derived fields (`year`, tag normalization) filled in.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        headline: impl Into<String>,
        speaker_1: impl Into<String>,
        occupation: [&str; 3],
        views: u64,
        duration: u32,
        published: NaiveDate,
        tags: impl IntoIterator<Item = impl AsRef<str>>,
        public_url: impl Into<String>,
    ) -> Self {
        let [broader, categorized, speaker] = occupation;
        Self {
            id,
            headline: headline.into(),
            speaker_1: speaker_1.into(),
            speaker1_occupation: speaker.to_string(),
            occupation_categorized: categorized.to_string(),
            occupation_broader: broader.to_string(),
            views,
            duration,
            year: published.year(),
            published,
            tags: normalize_tags(tags),
            public_url: public_url.into(),
        }
    }

    pub fn occupation(&self, level: OccupationLevel) -> &str {
        match level {
            OccupationLevel::Broader => &self.occupation_broader,
            OccupationLevel::Categorized => &self.occupation_categorized,
            OccupationLevel::Speaker => &self.speaker1_occupation,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Logical OR over `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.has_tag(t))
    }
}

/// Trims entries, drops empty ones and removes duplicates (the first occurrence keeps its place).
pub fn normalize_tags(tags: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Parses an encoded duration into whole minutes.
///
/// `h:mm:ss` yields the minutes component; a bare integer is already minutes.
pub fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let mut parts = raw.split(':');
    let first = parts.next()?;
    match parts.next() {
        None => first.trim().parse().ok(),
        Some(minutes) => minutes.trim().parse().ok(),
    }
}

/// Parses `%m/%d/%y`, falling back to ISO `%Y-%m-%d`.
pub fn parse_published(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%m/%d/%y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Parses a view count; tolerates a trailing `.0` or exponent notation.
pub fn parse_views(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}
