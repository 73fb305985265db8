//! CLI entry point for the standalone input validator.

use anyhow::{Result, anyhow};
use clap::Parser;
use neo_validation::{
    CoercionMode, PipelineConfig, ValidationError, ValidationOutcome, ValidationPipeline,
};
use polars::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Validate and clean a NEO hazard CSV file",
    long_about = "Runs the input-validation pipeline on a CSV file: checks the\n\
                  required feature columns, heals minor schema drift with\n\
                  default means, rejects rows with excessive missing values,\n\
                  deduplicates, and projects to the model feature set.\n\n\
                  EXAMPLES:\n  \
                  # Validate and preview\n  \
                  neo-validation -i nasa.csv\n\n  \
                  # Write the cleaned table back out\n  \
                  neo-validation -i nasa.csv -o cleaned.csv\n\n  \
                  # Parse numeric strings instead of rejecting them\n  \
                  neo-validation -i nasa.csv --coerce"
)]
struct Args {
    /// Path to the CSV file to validate
    #[arg(short, long)]
    input: PathBuf,

    /// Write the cleaned table to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Attempt numeric coercion instead of rejecting non-numeric columns
    #[arg(long)]
    coerce: bool,

    /// Retain the 'Hazardous' label column when present
    #[arg(long)]
    keep_label: bool,

    /// Output the validation report as JSON instead of a summary
    ///
    /// Disables all progress logs; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only contains the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = PipelineConfig::builder()
        .coercion_mode(if args.coerce {
            CoercionMode::Coerce
        } else {
            CoercionMode::Strict
        })
        .keep_label(args.keep_label)
        .build()?;

    let pipeline = ValidationPipeline::new(neo_validation::FeatureSchema::neo_hazard(), config);

    info!("Validating {}", args.input.display());
    let outcome = match pipeline.validate_file(&args.input) {
        Ok(outcome) => outcome,
        Err(e) => {
            if args.json {
                // Machine-readable failure: {code, message} on stdout,
                // mirroring the report shape of the success path.
                println!("{}", failure_json(&e)?);
            } else {
                error!("Validation failed: {}", e);
            }
            return Err(anyhow!("Validation failed: {}", e));
        }
    };

    if let Some(ref output) = args.output {
        write_cleaned_csv(&outcome, output)?;
        info!("Cleaned table written to {}", output.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print_summary(&args, &outcome);
    }

    Ok(())
}

/// Serialize a validation failure for `--json` consumers.
fn failure_json(err: &ValidationError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(err)
}

/// Write the validated table as CSV.
fn write_cleaned_csv(outcome: &ValidationOutcome, path: &std::path::Path) -> Result<()> {
    let mut df = outcome.data.clone();
    let file = std::fs::File::create(path)?;
    CsvWriter::new(file).include_header(true).finish(&mut df)?;
    Ok(())
}

/// Print a human-readable summary of the validation run.
///
/// Uses `println!` intentionally: this is the primary CLI output and
/// should be visible regardless of log level.
fn print_summary(args: &Args, outcome: &ValidationOutcome) {
    let report = &outcome.report;

    println!();
    println!("{}", "=".repeat(60));
    println!("INPUT DATA VALIDATED");
    println!("{}", "=".repeat(60));
    println!();
    println!("Input:  {}", args.input.display());
    println!(
        "Rows:   {} -> {} ({} duplicates removed)",
        report.rows_before, report.rows_after, report.duplicates_removed
    );
    println!(
        "Columns: {} features{}",
        outcome.data.width(),
        if args.keep_label { " (label retained when present)" } else { "" }
    );
    println!();

    if report.actions.is_empty() {
        println!("No healing was necessary.");
    } else {
        println!("Healing actions:");
        for action in &report.actions {
            println!("  - {}", action);
        }
    }
    println!();

    if args.output.is_none() {
        println!("Use --output to write the cleaned table to disk");
    }
    println!("Use --json for a machine-readable report");
    println!("{}", "=".repeat(60));
}
