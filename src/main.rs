//! CLI entry point for clip-filter.
//!
//! Usage:
//!   clip-filter <input.csv> <output-dir>
//!   clip-filter <input.csv> <output-dir> --rules rules.json --in-place
//!
//! Writes `valid.csv` and `invalid.csv` into the output directory. On any error a single line
//! is printed to stderr and the exit code is 1. Set `RUST_LOG=info` to see a run summary.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clip_filter::FilterResult;
use clip_filter::observability::{CompositeObserver, FileObserver, RunObserver, Severity, TracingObserver};
use clip_filter::output::OutputMode;
use clip_filter::pipeline::{RunOptions, run_from_path};
use clip_filter::processing::Classifier;
use clip_filter::rules::{FieldAccessors, load_rules_from_path};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "clip-filter",
    version,
    about = "Split a clip CSV export into valid.csv and invalid.csv id lists"
)]
struct Cli {
    /// Path of the input CSV file.
    input: PathBuf,

    /// Directory to write valid.csv and invalid.csv into.
    output_dir: PathBuf,

    /// JSON file holding the rule list to apply instead of the built-in clip rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Field delimiter of the input file (a single ASCII character).
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Truncate and write the outputs directly instead of renaming finished files into place.
    #[arg(long)]
    in_place: bool,

    /// Also append run events to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore a second initialisation instead of panicking.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_options(cli: &Cli) -> FilterResult<RunOptions> {
    let classifier = match &cli.rules {
        Some(path) => Classifier::new(load_rules_from_path(path)?, FieldAccessors::clips()),
        None => Classifier::clips(),
    };

    let mut observers: Vec<Arc<dyn RunObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &cli.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }

    Ok(RunOptions {
        classifier,
        delimiter: cli.delimiter,
        output_mode: if cli.in_place {
            OutputMode::InPlace
        } else {
            OutputMode::Atomic
        },
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = build_options(&cli).and_then(|opts| run_from_path(&cli.input, &cli.output_dir, &opts));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
