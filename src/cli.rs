//! Command-line interface components.

use crate::config::NormalizerConfig;
use crate::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_SAMPLE_SIZE, DEFAULT_USD_TO_INR_RATE,
};
use crate::error::{NormalizerError, Result};
use crate::models::{Field, NormalizedRecord};
use crate::normalizer::NormalizationResult;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tour-gross")]
#[command(about = "Clean concert tour gross CSV exports into deduplicated JSON with INR values")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// CSV export to normalize
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Destination for the JSON document
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// USD to INR conversion rate
    #[arg(short, long, default_value_t = DEFAULT_USD_TO_INR_RATE)]
    pub rate: f64,

    /// Number of records shown in the console sample
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample: usize,

    /// Extra header spelling for a field, as FIELD=HEADER (repeatable)
    #[arg(long = "alias", value_name = "FIELD=HEADER", value_parser = parse_alias)]
    pub aliases: Vec<(Field, String)>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the console report
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Build the run configuration described by these arguments
    pub fn to_config(&self) -> Result<NormalizerConfig> {
        let config = self.aliases.iter().fold(
            NormalizerConfig::default()
                .with_rate(self.rate)
                .with_sample_size(self.sample),
            |config, (field, header)| config.with_alias(*field, header.clone()),
        );
        config.validate()?;
        Ok(config)
    }

    /// Log filter directive for this run
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Parse a `FIELD=HEADER` alias argument
pub fn parse_alias(raw: &str) -> Result<(Field, String)> {
    let (field, header) = raw.split_once('=').ok_or_else(|| {
        NormalizerError::configuration(format!("Alias '{}' must look like FIELD=HEADER", raw))
    })?;
    if header.is_empty() {
        return Err(NormalizerError::configuration(format!(
            "Alias '{}' has an empty header name",
            raw
        )));
    }
    Ok((field.parse()?, header.to_string()))
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the `--verbose` flag.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tour_gross_normalizer={}", args.log_level()))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Print the run banner shown before processing starts
pub fn print_banner(args: &Args) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.bright_black());
    println!("{}", "Tour Gross Normalizer".bright_green().bold());
    println!("{}", rule.bright_black());
    println!("  {} {}", "Input file:".bright_cyan(), args.input.display());
    println!("  {} {}", "Output file:".bright_cyan(), args.output.display());
    println!("  {} {}", "USD to INR rate:".bright_cyan(), args.rate);
    println!("{}\n", rule.bright_black());
}

/// Print the processing summary and a sample of the first records
pub fn print_report(result: &NormalizationResult, sample_size: usize) {
    let stats = &result.stats;

    println!("{}", "Data cleaned successfully".bright_green().bold());
    println!(
        "  {} {}",
        "Records written:".bright_cyan(),
        stats.records_emitted.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.rows_read.to_string().bright_white()
    );
    if stats.dropped_missing_gross > 0 {
        println!(
            "  {} {}",
            "Dropped (no gross):".bright_yellow(),
            stats.dropped_missing_gross.to_string().bright_yellow()
        );
    }
    if stats.duplicates_skipped > 0 {
        println!(
            "  {} {}",
            "Duplicates skipped:".bright_yellow(),
            stats.duplicates_skipped.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Saved to:".bright_cyan(),
        stats.output_path.display()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms
    );

    if sample_size > 0 && !result.records.is_empty() {
        println!(
            "\n{}",
            format!(
                "Sample of cleaned data (first {} records):",
                sample_size.min(result.records.len())
            )
            .bright_yellow()
        );
        for (index, record) in result.records.iter().take(sample_size).enumerate() {
            print_sample_record(index + 1, record);
        }
    }
}

fn print_sample_record(number: usize, record: &NormalizedRecord) {
    println!("\n{}", format!("Record {}:", number).bold());
    println!("  {} {}", "Artist:".bright_cyan(), record.artist);
    println!("  {} {}", "Tour:".bright_cyan(), record.tour_title);
    println!(
        "  {} ${}",
        "Actual Gross (USD):".bright_cyan(),
        format_amount(record.actual_gross_usd)
    );
    let inr = record
        .actual_gross_inr
        .map(|amount| format!("₹{}", format_amount(amount)))
        .unwrap_or_else(|| "n/a".to_string());
    println!("  {} {}", "Actual Gross (INR):".bright_cyan(), inr);
}

/// Format an amount with two decimals and comma thousands separators
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
