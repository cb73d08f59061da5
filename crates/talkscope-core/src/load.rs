//! CSV loading.
//!
//! The whole file is parsed up front; a single malformed row fails the load so that the dashboard
//! never starts on a partial data set.

use crate::filter::DurationRange;
use crate::record::{
    TalkRecord, normalize_tags, parse_duration_minutes, parse_published, parse_views,
};
use crate::{Error, Result};
use chrono::Datelike;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// A row as it appears in the file. Everything is text until validated.
#[derive(Debug, Deserialize)]
struct RawTalkRow {
    #[serde(rename = "TALK_ID", alias = "id")]
    id: String,
    headline: String,
    speaker_1: String,
    speaker1_occupation: String,
    occupation_categorized: String,
    occupation_broader: String,
    views: String,
    duration: String,
    published: String,
    tags: String,
    public_url: String,
}

impl RawTalkRow {
    fn into_record(self, row: usize) -> Result<TalkRecord> {
        let invalid = |message: String| Error::InvalidRecord { row, message };

        let id = self
            .id
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(format!("invalid talk id {:?}", self.id)))?;
        let views = parse_views(&self.views)
            .ok_or_else(|| invalid(format!("invalid view count {:?}", self.views)))?;
        let duration = parse_duration_minutes(&self.duration)
            .ok_or_else(|| invalid(format!("invalid duration {:?}", self.duration)))?;
        let published = parse_published(&self.published)
            .ok_or_else(|| invalid(format!("invalid publish date {:?}", self.published)))?;
        let tags = normalize_tags(self.tags.split(','));
        if tags.is_empty() {
            return Err(invalid("talk has no tags".to_string()));
        }

        Ok(TalkRecord {
            id,
            headline: self.headline,
            speaker_1: self.speaker_1,
            speaker1_occupation: self.speaker1_occupation,
            occupation_categorized: self.occupation_categorized,
            occupation_broader: self.occupation_broader,
            views,
            duration,
            year: published.year(),
            published,
            tags,
            public_url: self.public_url,
        })
    }
}

/// The loaded records plus the data-derived duration bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<TalkRecord>,
    duration_bounds: DurationRange,
}

impl Dataset {
    /// Fails with `InvalidRecord` (1-based row) on a record without tags.
    pub fn new(records: Vec<TalkRecord>) -> Result<Self> {
        if let Some(row) = records.iter().position(|r| r.tags.is_empty()) {
            return Err(Error::InvalidRecord {
                row: row + 1,
                message: "talk has no tags".to_string(),
            });
        }
        let min = records.iter().map(|r| r.duration).min();
        let max = records.iter().map(|r| r.duration).max();
        let (Some(min), Some(max)) = (min, max) else {
            return Err(Error::EmptyDataset);
        };
        Ok(Self {
            records,
            duration_bounds: DurationRange::new(min, max),
        })
    }

    pub fn records(&self) -> &[TalkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn duration_bounds(&self) -> DurationRange {
        self.duration_bounds
    }
}

pub fn load_csv_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let dataset = load_csv_reader(file)?;
    info!(path = %path.display(), talks = dataset.len(), "loaded talk data set");
    Ok(dataset)
}

pub fn load_csv_str(text: &str) -> Result<Dataset> {
    load_csv_reader(text.as_bytes())
}

pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv.deserialize::<RawTalkRow>().enumerate() {
        let row_number = idx + 1;
        let raw = row.map_err(|e| match e.kind() {
            csv::ErrorKind::Deserialize { err, .. } => Error::InvalidRecord {
                row: row_number,
                message: err.to_string(),
            },
            _ => Error::Csv(e),
        })?;
        records.push(raw.into_record(row_number)?);
    }
    debug!(rows = records.len(), "parsed talk rows");

    Dataset::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "TALK_ID,headline,speaker_1,speaker1_occupation,occupation_categorized,occupation_broader,views,duration,published,tags,public_url\n";

    #[test]
    fn loads_rows_and_derives_bounds() {
        let text = format!(
            "{HEADER}1,Do schools kill creativity?,Ken Robinson,Author/educator,Educator,Education,72000000,0:19:24,06/27/06,\"children,creativity,culture\",https://example.org/1\n\
             2,Averting the climate crisis,Al Gore,Climate advocate,Activist,Activism,3500000,0:16:17,06/27/06,\"climate change,global issues\",https://example.org/2\n"
        );
        let dataset = load_csv_str(&text).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.duration_bounds(), DurationRange::new(16, 19));
        let first = &dataset.records()[0];
        assert_eq!(first.year, 2006);
        assert_eq!(first.tags, vec!["children", "creativity", "culture"]);
    }

    #[test]
    fn malformed_row_fails_the_whole_load() {
        let text = format!(
            "{HEADER}1,h,s,o,c,b,100,0:10:00,01/01/10,a,u\n2,h,s,o,c,b,lots,0:10:00,01/01/10,a,u\n"
        );
        let err = load_csv_str(&text).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { row: 2, .. }), "{err}");
    }

    #[test]
    fn row_without_tags_is_rejected() {
        let text = format!("{HEADER}1,h,s,o,c,b,100,0:10:00,01/01/10,\" , \",u\n");
        let err = load_csv_str(&text).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn constructed_records_need_tags() {
        let published = chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let tagged = TalkRecord::new(1, "h", "s", ["b", "c", "o"], 100, 10, published, ["a"], "u");
        let tagless = TalkRecord::new(2, "h", "s", ["b", "c", "o"], 100, 10, published, [" "], "u");
        let err = Dataset::new(vec![tagged, tagless]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { row: 2, .. }), "{err}");
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(matches!(load_csv_str(HEADER), Err(Error::EmptyDataset)));
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "TALK_ID,headline\n1,h\n";
        assert!(load_csv_str(text).is_err());
    }
}
