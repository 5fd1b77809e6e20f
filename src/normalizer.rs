//! Row normalization and deduplication
//!
//! Turns raw CSV rows into [`NormalizedRecord`]s in a single ordered pass:
//!
//! 1. Pull the actual gross from the first non-empty alias column
//! 2. Drop the row when it has no parseable actual gross
//! 3. Derive INR values for the actual, adjusted and average gross
//! 4. Drop the row when its `(Artist, Tour title, gross)` key was already seen
//! 5. Otherwise append the record
//!
//! Neither a drop nor a duplicate is an error. The first occurrence of a
//! key always wins and output order follows input order.

use crate::cleaning::{clean_price, derive_converted};
use crate::config::NormalizerConfig;
use crate::models::{DedupKey, Field, NormalizedRecord, ProcessingStats, RawRow};
use std::collections::HashSet;
use tracing::{debug, info};

/// What happened to a single input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Emitted,
    MissingGross,
    Duplicate,
}

/// Records produced by a run together with its statistics
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    pub records: Vec<NormalizedRecord>,
    pub stats: ProcessingStats,
}

impl NormalizationResult {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}

/// Stateful accumulator owning the seen-key set for one run
#[derive(Debug)]
pub struct RowNormalizer {
    config: NormalizerConfig,
    seen: HashSet<DedupKey>,
    records: Vec<NormalizedRecord>,
    stats: ProcessingStats,
}

impl RowNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            seen: HashSet::new(),
            records: Vec::new(),
            stats: ProcessingStats::new(),
        }
    }

    /// Normalize one row and append it unless it is dropped or a duplicate
    pub fn push(&mut self, row: &RawRow) -> RowOutcome {
        self.stats.rows_read += 1;
        let row_number = self.stats.rows_read;

        let Some(actual_gross_usd) = clean_price(self.lookup(row, Field::ActualGross)) else {
            debug!("Row {}: no parseable actual gross, skipping", row_number);
            self.stats.dropped_missing_gross += 1;
            return RowOutcome::MissingGross;
        };

        let artist = self.text(row, Field::Artist);
        let tour_title = self.text(row, Field::TourTitle);
        let key = DedupKey::new(&artist, &tour_title, actual_gross_usd);

        if !self.seen.insert(key) {
            debug!(
                "Row {}: duplicate of '{}' / '{}' at {}, skipping",
                row_number, artist, tour_title, actual_gross_usd
            );
            self.stats.duplicates_skipped += 1;
            return RowOutcome::Duplicate;
        }

        let rate = self.config.usd_to_inr_rate;
        let adjusted_gross_usd = clean_price(self.lookup(row, Field::AdjustedGross));
        let average_gross_usd = clean_price(self.lookup(row, Field::AverageGross));

        let record = NormalizedRecord {
            rank: self.text(row, Field::Rank),
            peak: self.text(row, Field::Peak),
            all_time_peak: self.text(row, Field::AllTimePeak),
            actual_gross_usd,
            actual_gross_inr: derive_converted(Some(actual_gross_usd), rate),
            adjusted_gross_usd,
            adjusted_gross_inr: derive_converted(adjusted_gross_usd, rate),
            artist,
            tour_title,
            years: self.text(row, Field::Years),
            shows: self.text(row, Field::Shows),
            average_gross_usd,
            average_gross_inr: derive_converted(average_gross_usd, rate),
            reference: self.text(row, Field::Ref),
        };
        self.records.push(record);
        self.stats.records_emitted += 1;

        RowOutcome::Emitted
    }

    pub fn finish(self) -> NormalizationResult {
        info!(
            "Normalization complete: {} of {} rows kept ({} without gross, {} duplicates)",
            self.stats.records_emitted,
            self.stats.rows_read,
            self.stats.dropped_missing_gross,
            self.stats.duplicates_skipped
        );

        NormalizationResult {
            records: self.records,
            stats: self.stats,
        }
    }

    fn lookup<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r str> {
        row.first_non_empty(self.config.aliases.for_field(field))
    }

    fn text(&self, row: &RawRow, field: Field) -> String {
        self.lookup(row, field)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

/// Normalize a whole row sequence in one sequential pass
pub fn normalize_rows<I>(rows: I, config: &NormalizerConfig) -> NormalizationResult
where
    I: IntoIterator,
    I::Item: AsRef<RawRow>,
{
    let mut normalizer = RowNormalizer::new(config.clone());
    for row in rows {
        normalizer.push(row.as_ref());
    }
    normalizer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    fn tour(artist: &str, title: &str, gross: &str) -> RawRow {
        row(&[
            ("Rank", " 1 "),
            ("Artist", artist),
            ("Tour title", title),
            ("Actual gross", gross),
        ])
    }

    #[test]
    fn test_end_to_end_scenario() {
        let rows = vec![
            tour("A", "T1", "$100"),
            tour("A", "T1", "$100"),
            tour("B", "T2", "N/A"),
        ];

        let result = normalize_rows(&rows, &NormalizerConfig::default());

        assert_eq!(result.record_count(), 1);
        let record = &result.records[0];
        assert_eq!(record.artist, "A");
        assert_eq!(record.actual_gross_usd, 100.0);
        assert_eq!(record.actual_gross_inr, Some(8300.0));
        assert_eq!(result.stats.rows_read, 3);
        assert_eq!(result.stats.duplicates_skipped, 1);
        assert_eq!(result.stats.dropped_missing_gross, 1);
    }

    #[test]
    fn test_push_reports_outcome() {
        let mut normalizer = RowNormalizer::new(NormalizerConfig::default());

        assert_eq!(normalizer.push(&tour("A", "T", "$5")), RowOutcome::Emitted);
        assert_eq!(normalizer.push(&tour("A", "T", "5.0")), RowOutcome::Duplicate);
        assert_eq!(normalizer.push(&tour("A", "T", "")), RowOutcome::MissingGross);
        assert_eq!(normalizer.finish().record_count(), 1);
    }

    #[test]
    fn test_first_occurrence_wins_and_order_is_preserved() {
        let mut first = tour("A", "T1", "$100");
        first.insert("Shows", "10");
        let mut dup = tour("A", "T1", "100");
        dup.insert("Shows", "99");

        let rows = vec![
            tour("C", "T3", "300"),
            first,
            tour("B", "T2", "200"),
            dup,
        ];
        let result = normalize_rows(&rows, &NormalizerConfig::default());

        let artists: Vec<&str> = result.records.iter().map(|r| r.artist.as_str()).collect();
        assert_eq!(artists, ["C", "A", "B"]);
        assert_eq!(result.records[1].shows, "10");
    }

    #[test]
    fn test_dedup_key_uses_trimmed_text_and_cleaned_gross() {
        let rows = vec![
            tour("A", "T1", "$1,000"),
            tour("  A ", " T1", "1000[a]"),
        ];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        assert_eq!(result.record_count(), 1);
    }

    #[test]
    fn test_different_gross_is_not_a_duplicate() {
        let rows = vec![tour("A", "T1", "100"), tour("A", "T1", "101")];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        assert_eq!(result.record_count(), 2);
    }

    #[test]
    fn test_row_without_gross_is_dropped_regardless_of_other_fields() {
        let rows = vec![row(&[
            ("Artist", "Taylor Swift"),
            ("Tour title", "The Eras Tour"),
            ("Adjusted gross (in 2022 dollars)", "$2,000,000,000"),
            ("Average gross", "$13,000,000"),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        assert!(result.records.is_empty());
        assert_eq!(result.stats.dropped_missing_gross, 1);
    }

    #[test]
    fn test_nbsp_header_is_preferred_over_plain() {
        let rows = vec![row(&[
            ("Actual\u{a0}gross", "$200"),
            ("Actual gross", "$100"),
            ("Artist", "A"),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        assert_eq!(result.records[0].actual_gross_usd, 200.0);
    }

    #[test]
    fn test_empty_nbsp_header_falls_back_to_plain() {
        let rows = vec![row(&[
            ("Actual\u{a0}gross", ""),
            ("Actual gross", "$100"),
            ("Adjusted\u{a0}gross (in 2022 dollars)", "$150"),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        assert_eq!(result.records[0].actual_gross_usd, 100.0);
        assert_eq!(result.records[0].adjusted_gross_usd, Some(150.0));
        assert_eq!(result.records[0].adjusted_gross_inr, Some(12450.0));
    }

    #[test]
    fn test_optional_pairs_derive_independently() {
        let rows = vec![row(&[
            ("Actual gross", "$1,000"),
            ("Adjusted gross (in 2022 dollars)", "N/A"),
            ("Average gross", "$12.34[b]"),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        let record = &result.records[0];

        assert_eq!(record.adjusted_gross_usd, None);
        assert_eq!(record.adjusted_gross_inr, None);
        assert_eq!(record.average_gross_usd, Some(12.34));
        assert_eq!(record.average_gross_inr, Some(1024.22));
    }

    #[test]
    fn test_zero_gross_is_kept_but_has_no_inr() {
        // Current behavior: zero counts as "no value" for every INR field.
        let rows = vec![row(&[
            ("Actual gross", "$0"),
            ("Average gross", "0"),
            ("Artist", "Z"),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        let record = &result.records[0];

        assert_eq!(record.actual_gross_usd, 0.0);
        assert_eq!(record.actual_gross_inr, None);
        assert_eq!(record.average_gross_usd, Some(0.0));
        assert_eq!(record.average_gross_inr, None);
    }

    #[test]
    fn test_missing_text_columns_become_empty_strings() {
        let rows = vec![row(&[("Actual gross", "1")])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        let record = &result.records[0];

        assert_eq!(record.rank, "");
        assert_eq!(record.artist, "");
        assert_eq!(record.tour_title, "");
        assert_eq!(record.reference, "");
        assert_eq!(record.all_time_peak, "");
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let rows = vec![row(&[
            ("Actual gross", "1"),
            ("Rank", " 3 "),
            ("Year(s)", "\t2016–2017 "),
            ("Ref.", " [12] "),
        ])];
        let result = normalize_rows(&rows, &NormalizerConfig::default());
        let record = &result.records[0];

        assert_eq!(record.rank, "3");
        assert_eq!(record.years, "2016–2017");
        assert_eq!(record.reference, "[12]");
    }

    #[test]
    fn test_custom_alias_and_rate() {
        let config = NormalizerConfig::default()
            .with_rate(2.0)
            .with_alias(Field::ActualGross, "Gross")
            .with_alias(Field::Artist, "Performer");

        let rows = vec![row(&[("Gross", "$10"), ("Performer", "Pink")])];
        let result = normalize_rows(&rows, &config);

        assert_eq!(result.records[0].actual_gross_inr, Some(20.0));
        assert_eq!(result.records[0].artist, "Pink");
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<RawRow> = Vec::new();
        let result = normalize_rows(rows, &NormalizerConfig::default());
        assert_eq!(result.record_count(), 0);
        assert_eq!(result.stats, ProcessingStats::default());
    }
}
