//! Tour Gross Normalizer Library
//!
//! Cleans messy CSV exports of concert-tour gross revenue tables into a
//! deduplicated JSON record set with INR values derived at a fixed rate.
//!
//! This library provides tools for:
//! - Parsing dollar-prefixed, comma-grouped, footnoted numeric cells
//! - Resolving header spelling variants through per-field alias lists
//! - Dropping rows without a usable gross and suppressing duplicates
//! - Deriving rounded INR counterparts for every gross figure
//! - Writing the result as pretty-printed JSON, atomically

pub mod cleaning;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod processor;
pub mod reader;
pub mod writer;

pub use config::{ColumnAliases, NormalizerConfig};
pub use error::{NormalizerError, Result};
pub use models::{DedupKey, Field, NormalizedRecord, ProcessingStats, RawRow, RawTable};
pub use normalizer::{NormalizationResult, RowNormalizer, RowOutcome, normalize_rows};
pub use processor::{TourGrossProcessor, normalize_file};
