use anyhow::Context;
use clap::Parser;
use std::process;
use tour_gross_normalizer::cli::{self, Args};
use tour_gross_normalizer::processor::TourGrossProcessor;
use tour_gross_normalizer::NormalizationResult;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    match run(&args) {
        Ok(_) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<NormalizationResult> {
    let config = args.to_config()?;

    if !args.quiet {
        cli::print_banner(args);
    }

    let result = TourGrossProcessor::new(&args.input, &args.output)?
        .with_config(config.clone())
        .process()
        .with_context(|| format!("failed to normalize {}", args.input.display()))?;

    if !args.quiet {
        cli::print_report(&result, config.sample_size);
    }

    Ok(result)
}
