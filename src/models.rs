//! Core data structures for tour gross normalization.
//!
//! Defines the logical input fields, the raw row read from the CSV export,
//! the normalized output record, the deduplication key and the run
//! statistics reported at the end of processing.

use crate::constants::columns;
use crate::error::NormalizerError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Logical input fields recognized in the source export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Rank,
    Peak,
    AllTimePeak,
    ActualGross,
    AdjustedGross,
    AverageGross,
    Artist,
    TourTitle,
    Years,
    Shows,
    Ref,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Rank,
        Field::Peak,
        Field::AllTimePeak,
        Field::ActualGross,
        Field::AdjustedGross,
        Field::AverageGross,
        Field::Artist,
        Field::TourTitle,
        Field::Years,
        Field::Shows,
        Field::Ref,
    ];

    /// Header spelling used when no alias is configured
    pub fn canonical_header(&self) -> &'static str {
        match self {
            Field::Rank => columns::RANK,
            Field::Peak => columns::PEAK,
            Field::AllTimePeak => columns::ALL_TIME_PEAK,
            Field::ActualGross => columns::ACTUAL_GROSS,
            Field::AdjustedGross => columns::ADJUSTED_GROSS,
            Field::AverageGross => columns::AVERAGE_GROSS,
            Field::Artist => columns::ARTIST,
            Field::TourTitle => columns::TOUR_TITLE,
            Field::Years => columns::YEARS,
            Field::Shows => columns::SHOWS,
            Field::Ref => columns::REF,
        }
    }

    /// Short identifier accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Field::Rank => "rank",
            Field::Peak => "peak",
            Field::AllTimePeak => "all_time_peak",
            Field::ActualGross => "actual_gross",
            Field::AdjustedGross => "adjusted_gross",
            Field::AverageGross => "average_gross",
            Field::Artist => "artist",
            Field::TourTitle => "tour_title",
            Field::Years => "years",
            Field::Shows => "shows",
            Field::Ref => "ref",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Field::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| {
                NormalizerError::configuration(format!(
                    "Unknown field '{}' (expected one of: {})",
                    s,
                    Field::ALL.map(|f| f.key()).join(", ")
                ))
            })
    }
}

/// One input record keyed by header name, exactly as read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell; a repeated header overwrites the earlier value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Value of the first candidate column holding a non-empty string
    ///
    /// Whitespace-only values count as non-empty here; cleaning rejects
    /// them afterwards.
    pub fn first_non_empty<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&str> {
        candidates
            .iter()
            .filter_map(|name| self.get(name.as_ref()))
            .find(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl AsRef<RawRow> for RawRow {
    fn as_ref(&self) -> &RawRow {
        self
    }
}

/// Raw rows plus the header line they were read under
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Cleaned, currency-augmented output record
///
/// Field order here is the key order of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Peak")]
    pub peak: String,
    #[serde(rename = "All Time Peak")]
    pub all_time_peak: String,
    #[serde(rename = "Actual gross (USD)")]
    pub actual_gross_usd: f64,
    #[serde(rename = "Actual gross (INR)")]
    pub actual_gross_inr: Option<f64>,
    #[serde(rename = "Adjusted gross USD (in 2022 dollars)")]
    pub adjusted_gross_usd: Option<f64>,
    #[serde(rename = "Adjusted gross INR (in 2022 dollars)")]
    pub adjusted_gross_inr: Option<f64>,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Tour title")]
    pub tour_title: String,
    #[serde(rename = "Year(s)")]
    pub years: String,
    #[serde(rename = "Shows")]
    pub shows: String,
    #[serde(rename = "Average gross (USD)")]
    pub average_gross_usd: Option<f64>,
    #[serde(rename = "Average gross (INR)")]
    pub average_gross_inr: Option<f64>,
    #[serde(rename = "Ref.")]
    pub reference: String,
}

/// Identity of a record for duplicate suppression
///
/// The gross is compared by bit pattern, with negative zero folded onto
/// positive zero so the key agrees with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    artist: String,
    tour_title: String,
    actual_gross_bits: u64,
}

impl DedupKey {
    pub fn new(artist: &str, tour_title: &str, actual_gross_usd: f64) -> Self {
        let gross = if actual_gross_usd == 0.0 {
            0.0
        } else {
            actual_gross_usd
        };
        Self {
            artist: artist.to_string(),
            tour_title: tour_title.to_string(),
            actual_gross_bits: gross.to_bits(),
        }
    }
}

/// Processing statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    /// Data rows read from the input, header excluded
    pub rows_read: usize,
    /// Rows skipped because the actual gross had no parseable value
    pub dropped_missing_gross: usize,
    /// Rows skipped because their dedup key was already seen
    pub duplicates_skipped: usize,
    pub records_emitted: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of input rows that made it to the output, as a percentage
    pub fn retention_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.records_emitted as f64 / self.rows_read as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows read -> {} records ({:.1}% kept) | dropped without gross: {} | duplicates: {}",
            self.rows_read,
            self.records_emitted,
            self.retention_rate(),
            self.dropped_missing_gross,
            self.duplicates_skipped
        )
    }
}
