//! Main processing engine.
//!
//! Orchestrates a complete normalization run: read the CSV export,
//! normalize and deduplicate every row, then write the JSON document
//! atomically. The whole input is held in memory before anything is
//! written.

use crate::config::NormalizerConfig;
use crate::error::{NormalizerError, Result};
use crate::normalizer::{NormalizationResult, normalize_rows};
use crate::reader::read_raw_table;
use crate::writer::write_records;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Runs one input file through the normalization pipeline
#[derive(Debug, Clone)]
pub struct TourGrossProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: NormalizerConfig,
}

impl TourGrossProcessor {
    /// Create a new processor
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Result<Self> {
        let input_path = input_path.into();

        if !input_path.exists() {
            return Err(NormalizerError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path: output_path.into(),
            config: NormalizerConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<NormalizationResult> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Reading {}", self.input_path.display());
        let table = read_raw_table(&self.input_path)?;

        let unrecognized = self.config.aliases.unrecognized(&table.headers);
        if !unrecognized.is_empty() {
            warn!("Ignoring unrecognized columns: {:?}", unrecognized);
        }

        let mut result = normalize_rows(&table.rows, &self.config);

        write_records(&self.output_path, &result.records)?;
        result.stats.output_path = self.output_path.clone();
        result.stats.processing_time_ms = start_time.elapsed().as_millis();

        info!("Saved to {}: {}", self.output_path.display(), result.summary());

        Ok(result)
    }
}

/// Normalize `input_path` into `output_path` at the given conversion rate
pub fn normalize_file(
    input_path: &Path,
    output_path: &Path,
    usd_to_inr_rate: f64,
) -> Result<NormalizationResult> {
    TourGrossProcessor::new(input_path, output_path)?
        .with_config(NormalizerConfig::default().with_rate(usd_to_inr_rate))
        .process()
}
