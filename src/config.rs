//! Configuration for normalization runs.
//!
//! Holds the conversion rate, the console sample size and the table of
//! header aliases each logical field may appear under. Everything is
//! passed into the pipeline explicitly; nothing is read from the
//! environment.

use crate::constants::{DEFAULT_SAMPLE_SIZE, DEFAULT_USD_TO_INR_RATE, columns};
use crate::error::{NormalizerError, Result};
use crate::models::Field;
use std::collections::HashMap;
use tracing::debug;

/// Acceptable header spellings per logical field, in lookup order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAliases {
    by_field: HashMap<Field, Vec<String>>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        let mut by_field: HashMap<Field, Vec<String>> = Field::ALL
            .into_iter()
            .map(|field| (field, vec![field.canonical_header().to_string()]))
            .collect();

        // Some exports use a non-breaking space in the gross headers and it
        // takes precedence over the plain spelling when both are present.
        by_field.insert(
            Field::ActualGross,
            vec![
                columns::ACTUAL_GROSS_NBSP.to_string(),
                columns::ACTUAL_GROSS.to_string(),
            ],
        );
        by_field.insert(
            Field::AdjustedGross,
            vec![
                columns::ADJUSTED_GROSS_NBSP.to_string(),
                columns::ADJUSTED_GROSS.to_string(),
            ],
        );

        Self { by_field }
    }
}

impl ColumnAliases {
    /// Header names tried for `field`, first match wins
    pub fn for_field(&self, field: Field) -> &[String] {
        self.by_field
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append an extra header spelling for `field`
    ///
    /// Added aliases are tried after the built-in ones. Adding a spelling
    /// that is already listed is a no-op.
    pub fn add(&mut self, field: Field, header: impl Into<String>) {
        let header = header.into();
        let aliases = self.by_field.entry(field).or_default();
        if !aliases.contains(&header) {
            debug!("Registered alias '{}' for field {}", header, field);
            aliases.push(header);
        }
    }

    /// Builder-style variant of [`ColumnAliases::add`]
    pub fn with_alias(mut self, field: Field, header: impl Into<String>) -> Self {
        self.add(field, header);
        self
    }

    /// Whether `header` maps to any known field
    pub fn recognizes(&self, header: &str) -> bool {
        self.by_field
            .values()
            .any(|aliases| aliases.iter().any(|alias| alias == header))
    }

    /// Headers that no field reads, in input order
    pub fn unrecognized<'h>(&self, headers: &'h [String]) -> Vec<&'h str> {
        headers
            .iter()
            .map(String::as_str)
            .filter(|header| !self.recognizes(header))
            .collect()
    }
}

/// Parameters of a single normalization run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// USD to INR conversion rate applied to every gross figure
    pub usd_to_inr_rate: f64,

    /// Number of records echoed in the console sample
    pub sample_size: usize,

    /// Header aliases per logical field
    pub aliases: ColumnAliases,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            usd_to_inr_rate: DEFAULT_USD_TO_INR_RATE,
            sample_size: DEFAULT_SAMPLE_SIZE,
            aliases: ColumnAliases::default(),
        }
    }
}

impl NormalizerConfig {
    /// Create configuration with a custom conversion rate
    pub fn with_rate(mut self, usd_to_inr_rate: f64) -> Self {
        self.usd_to_inr_rate = usd_to_inr_rate;
        self
    }

    /// Create configuration with a custom console sample size
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Register an extra header spelling for a field
    pub fn with_alias(mut self, field: Field, header: impl Into<String>) -> Self {
        self.aliases.add(field, header);
        self
    }

    /// Reject rates that would make every derived value meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.usd_to_inr_rate.is_finite() || self.usd_to_inr_rate <= 0.0 {
            return Err(NormalizerError::configuration(format!(
                "Conversion rate must be a positive finite number, got {}",
                self.usd_to_inr_rate
            )));
        }
        Ok(())
    }
}
