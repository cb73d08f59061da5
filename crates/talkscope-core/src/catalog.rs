//! The ranked tag catalog and its color assignment.

use crate::record::TalkRecord;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Categorical palette; a tag's color is `PALETTE[rank]`.
pub const PALETTE: [&str; 50] = [
    "#2f4f4f", "#556b2f", "#8b4513", "#2e8b57", "#7f0000",
    "#006400", "#708090", "#808000", "#483d8b", "#bc8f8f",
    "#008b8b", "#4682b4", "#d2691e", "#9acd32", "#cd5c5c",
    "#4b0082", "#32cd32", "#daa520", "#8fbc8f", "#8b008b",
    "#b03060", "#d2b48c", "#48d1cc", "#9932cc", "#ff0000",
    "#ff8c00", "#ffd700", "#0000cd", "#00ff00", "#00fa9a",
    "#dc143c", "#00bfff", "#0000ff", "#a020f0", "#adff2f",
    "#ff6347", "#da70d6", "#d8bfd8", "#ff00ff", "#f0e68c",
    "#ffff54", "#6495ed", "#dda0dd", "#90ee90", "#add8e6",
    "#ff1493", "#7b68ee", "#ffa07a", "#7fffd4", "#ff69b4",
];

pub fn palette_color(rank: usize) -> &'static str {
    PALETTE[rank % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogTag {
    pub name: String,
    pub rank: usize,
    /// Number of talks carrying the tag in the full data set.
    pub count: usize,
    pub color: &'static str,
}

/// Top-N tags by descending frequency over the unfiltered data set.
///
/// Built once per session. Ties keep first-encountered order.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<CatalogTag>,
    by_name: FxHashMap<String, usize>,
}

impl TagCatalog {
    pub fn from_records(records: &[TalkRecord], top_n: usize) -> Self {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for record in records {
            let mut seen: Vec<&str> = Vec::with_capacity(record.tags.len());
            for tag in &record.tags {
                if seen.contains(&tag.as_str()) {
                    continue;
                }
                seen.push(tag);
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked = counts.into_iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);

        let tags = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (name, count))| CatalogTag {
                name: name.to_string(),
                rank,
                count,
                color: palette_color(rank),
            })
            .collect::<Vec<_>>();
        let by_name = tags
            .iter()
            .map(|t| (t.name.clone(), t.rank))
            .collect::<FxHashMap<_, _>>();
        Self { tags, by_name }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&CatalogTag> {
        self.tags.get(rank)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn color_of(&self, name: &str) -> Option<&'static str> {
        self.index_of(name).map(|i| self.tags[i].color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogTag> {
        self.tags.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}
