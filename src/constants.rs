//! Application constants for the tour gross normalizer
//!
//! Column names as they appear in the source export, output key names,
//! and the defaults used by the command-line interface.

// =============================================================================
// Defaults
// =============================================================================

/// Default input file consumed when no `--input` is given
pub const DEFAULT_INPUT_FILE: &str = "Messy_sales.csv";

/// Default output file written when no `--output` is given
pub const DEFAULT_OUTPUT_FILE: &str = "cleaned_sales.json";

/// Default USD to INR conversion rate
pub const DEFAULT_USD_TO_INR_RATE: f64 = 83.0;

/// Number of records shown in the console sample
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Decimal places kept on derived currency values
pub const CURRENCY_DECIMAL_PLACES: usize = 2;

/// Non-breaking space, used by some exports inside header names
pub const NBSP: char = '\u{a0}';

// =============================================================================
// Input Columns
// =============================================================================

/// Header names as found in the source export
pub mod columns {
    pub const RANK: &str = "Rank";
    pub const PEAK: &str = "Peak";
    pub const ALL_TIME_PEAK: &str = "All Time Peak";
    pub const ACTUAL_GROSS: &str = "Actual gross";
    pub const ACTUAL_GROSS_NBSP: &str = "Actual\u{a0}gross";
    pub const ADJUSTED_GROSS: &str = "Adjusted gross (in 2022 dollars)";
    pub const ADJUSTED_GROSS_NBSP: &str = "Adjusted\u{a0}gross (in 2022 dollars)";
    pub const AVERAGE_GROSS: &str = "Average gross";
    pub const ARTIST: &str = "Artist";
    pub const TOUR_TITLE: &str = "Tour title";
    pub const YEARS: &str = "Year(s)";
    pub const SHOWS: &str = "Shows";
    pub const REF: &str = "Ref.";
}

/// Characters stripped from numeric cells before parsing
pub const NUMERIC_NOISE_CHARS: &[char] = &['$', '"', ',', '\''];

/// Non-greedy pattern matching one bracketed footnote marker
pub const FOOTNOTE_PATTERN: &str = r"\[.*?\]";
