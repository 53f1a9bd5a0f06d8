// Dataset loading: CSV rows → validated, sorted, immutable work records.
// Rows with unusable years are dropped here so nothing downstream sees a partial record.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::RecordId;

/// A multi-year setting parsed from "YYYY-YYYY".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSpan {
    pub start: f64,
    pub end: f64,
}

/// One work of futuristic fiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub id: RecordId,
    pub release_year: f64,
    pub set_year: f64,
    pub years_distant: Option<f64>,
    pub medium: Option<String>,
    pub genre: Option<String>,
    pub creator: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub predictions: Option<String>,
    pub external_link: Option<String>,
    pub series_id: Option<String>,
    /// Raw `multiyears` text, kept for display even when it doesn't parse.
    pub span_text: Option<String>,
    pub span: Option<YearSpan>,
    /// Layout only: alternates in (release, set) order. Assigned once at load.
    pub above_baseline: bool,
}

impl WorkRecord {
    pub fn new(id: impl Into<String>, release_year: f64, set_year: f64) -> Self {
        WorkRecord {
            id: RecordId::new(id),
            release_year,
            set_year,
            years_distant: Some(set_year - release_year),
            medium: None,
            genre: None,
            creator: None,
            title: None,
            notes: None,
            predictions: None,
            external_link: None,
            series_id: None,
            span_text: None,
            span: None,
            above_baseline: false,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = non_empty(Some(title.to_string()));
        self
    }

    pub fn with_medium(mut self, medium: &str) -> Self {
        self.medium = non_empty(Some(medium.to_string()));
        self
    }

    pub fn with_series(mut self, series_id: &str) -> Self {
        self.series_id = non_empty(Some(series_id.to_string()));
        self
    }

    pub fn with_span(mut self, text: &str) -> Self {
        self.span_text = non_empty(Some(text.to_string()));
        self.span = self.span_text.as_deref().and_then(parse_span);
        self
    }

    pub fn medium(&self) -> Option<&str> {
        self.medium.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn series_id(&self) -> Option<&str> {
        self.series_id.as_deref()
    }

    /// Distance shown in the sidebar; falls back to the year difference.
    pub fn distance(&self) -> f64 {
        self.years_distant
            .unwrap_or(self.set_year - self.release_year)
    }
}

/// CSV row as it appears in the file. Every column is optional text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    record_id: Option<String>,
    released: Option<String>,
    year_set: Option<String>,
    years_distant: Option<String>,
    medium: Option<String>,
    genre: Option<String>,
    creator: Option<String>,
    title: Option<String>,
    notes: Option<String>,
    predictions: Option<String>,
    is_series: Option<String>,
    multiyears: Option<String>,
    wikipedia_pg: Option<String>,
}

impl RawRow {
    /// Convert to a record; `None` when a required year is missing or non-numeric.
    fn into_record(self, row_index: usize) -> Option<WorkRecord> {
        let release_year = parse_year(self.released.as_deref())?;
        let set_year = parse_year(self.year_set.as_deref())?;
        if set_year <= 0.0 {
            return None;
        }

        let id = non_empty(self.record_id).unwrap_or_else(|| format!("row-{}", row_index));
        let span_text = non_empty(self.multiyears);
        let span = span_text.as_deref().and_then(parse_span);

        Some(WorkRecord {
            id: RecordId::new(id),
            release_year,
            set_year,
            years_distant: parse_year(self.years_distant.as_deref()),
            medium: non_empty(self.medium),
            genre: non_empty(self.genre),
            creator: non_empty(self.creator),
            title: non_empty(self.title),
            notes: non_empty(self.notes),
            predictions: non_empty(self.predictions),
            external_link: non_empty(self.wikipedia_pg),
            series_id: non_empty(self.is_series),
            span_text,
            span,
            above_baseline: false,
        })
    }
}

fn parse_year(text: Option<&str>) -> Option<f64> {
    let value: f64 = text?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Parse exactly "YYYY-YYYY". Anything else yields `None`.
pub fn parse_span(text: &str) -> Option<YearSpan> {
    let (start, end) = text.trim().split_once('-')?;
    let four_digits = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
    if !four_digits(start) || !four_digits(end) {
        return None;
    }
    Some(YearSpan {
        start: start.parse().ok()?,
        end: end.parse().ok()?,
    })
}

/// The full record set, sorted by (release, set) and immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WorkRecord>,
    dropped: usize,
}

impl Dataset {
    /// Parse CSV text. Malformed rows are dropped; an unreadable header is an error.
    pub fn from_csv(text: &str) -> Result<Self, EngineError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        // Surface header problems up front instead of silently loading nothing.
        reader.headers()?;

        let mut records = Vec::new();
        let mut dropped = 0;
        for (index, row) in reader.deserialize::<RawRow>().enumerate() {
            match row.map(|raw| raw.into_record(index)) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    debug!("dropping row {}: missing or non-numeric year", index);
                    dropped += 1;
                }
                Err(err) => {
                    debug!("dropping row {}: {}", index, err);
                    dropped += 1;
                }
            }
        }

        let mut dataset = Dataset::from_records(records);
        dataset.dropped = dropped;
        info!(
            "loaded {} records ({} dropped, {} series)",
            dataset.len(),
            dropped,
            dataset.series_count()
        );
        Ok(dataset)
    }

    /// Sort by (release, set) and assign the above/below alternation.
    pub fn from_records(mut records: Vec<WorkRecord>) -> Self {
        records.retain(|r| r.release_year.is_finite() && r.set_year.is_finite());
        records.sort_by(|a, b| {
            a.release_year
                .total_cmp(&b.release_year)
                .then(a.set_year.total_cmp(&b.set_year))
        });
        for (i, record) in records.iter_mut().enumerate() {
            record.above_baseline = i % 2 == 0;
        }
        Dataset {
            records,
            dropped: 0,
        }
    }

    pub fn records(&self) -> &[WorkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows rejected during the CSV load.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn index_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&WorkRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Count of records per trimmed medium, in first-seen order.
    pub fn medium_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for medium in self.records.iter().filter_map(|r| r.medium()) {
            match counts.iter_mut().find(|(m, _)| m == medium) {
                Some((_, n)) => *n += 1,
                None => counts.push((medium.to_string(), 1)),
            }
        }
        counts
    }

    fn series_count(&self) -> usize {
        let mut ids: Vec<&str> = self.records.iter().filter_map(|r| r.series_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
record_id,released,year_set,years_distant,medium,genre,creator,title,notes,predictions,is_series,multiyears,wikipedia_pg
r1,1968,2001,33,film,science fiction,Stanley Kubrick,2001: A Space Odyssey,,Tablet computers,,,https://en.wikipedia.org/wiki/2001
r2,1965,10191,8226,prose fiction,,Frank Herbert,Dune,,,Q1,,
r3,abc,2001,,film,,,Broken,,,,,
r4,1984,2029,45,film,,,The Terminator,,,Q2,2029-2031,
r5,1895,802701,800806,prose fiction,,H. G. Wells,The Time Machine,,,,,
r6,1999,0,,film,,,Zero,,,,,
r7,1969,1e15,,comics,,,Infinite,,,,not a span,
";

    #[test]
    fn drops_malformed_rows() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.dropped(), 2);
        assert!(dataset.get(&RecordId::new("r3")).is_none());
        assert!(dataset.get(&RecordId::new("r6")).is_none());
    }

    #[test]
    fn sorts_by_release_then_set() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        let ids: Vec<&str> = dataset.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r5", "r2", "r1", "r7", "r4"]);
    }

    #[test]
    fn parses_optional_fields() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        let dune = dataset.get(&RecordId::new("r2")).unwrap();
        assert_eq!(dune.series_id(), Some("Q1"));
        assert_eq!(dune.genre, None);
        assert_eq!(dune.external_link, None);

        let terminator = dataset.get(&RecordId::new("r4")).unwrap();
        assert_eq!(
            terminator.span,
            Some(YearSpan {
                start: 2029.0,
                end: 2031.0
            })
        );

        let infinite = dataset.get(&RecordId::new("r7")).unwrap();
        assert_eq!(infinite.set_year, 1e15);
        assert_eq!(infinite.span, None);
        assert_eq!(infinite.span_text.as_deref(), Some("not a span"));
    }

    #[test]
    fn missing_columns_degrade() {
        let csv = "record_id,released,year_set\nx,1990,2050\n";
        let dataset = Dataset::from_csv(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.medium(), None);
        assert_eq!(record.series_id(), None);
        assert_eq!(record.distance(), 60.0);
    }

    #[test]
    fn missing_id_gets_row_id() {
        let csv = "released,year_set\n1990,2050\n";
        let dataset = Dataset::from_csv(csv).unwrap();
        assert_eq!(dataset.records()[0].id.as_str(), "row-0");
    }

    #[test]
    fn span_parsing() {
        assert_eq!(
            parse_span(" 2100-2200 "),
            Some(YearSpan {
                start: 2100.0,
                end: 2200.0
            })
        );
        assert_eq!(parse_span("2100-220"), None);
        assert_eq!(parse_span("21000-2200"), None);
        assert_eq!(parse_span("2100 to 2200"), None);
        assert_eq!(parse_span("+210-2200"), None);
    }

    #[test]
    fn medium_counts_follow_first_seen_order() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        assert_eq!(
            dataset.medium_counts(),
            vec![
                ("prose fiction".to_string(), 2),
                ("film".to_string(), 2),
                ("comics".to_string(), 1),
            ]
        );
    }

    proptest! {
        #[test]
        fn above_baseline_strictly_alternates(
            years in prop::collection::vec((1700i32..2100, 1700i32..5000), 0..60)
        ) {
            let records = years
                .iter()
                .enumerate()
                .map(|(i, (r, s))| WorkRecord::new(format!("w{}", i), *r as f64, *s as f64))
                .collect();
            let dataset = Dataset::from_records(records);
            let recs = dataset.records();

            for pair in recs.windows(2) {
                prop_assert!(pair[0].above_baseline != pair[1].above_baseline);
                prop_assert!(
                    (pair[0].release_year, pair[0].set_year) <= (pair[1].release_year, pair[1].set_year)
                );
            }
            if let Some(first) = recs.first() {
                prop_assert!(first.above_baseline);
            }
        }
    }
}
