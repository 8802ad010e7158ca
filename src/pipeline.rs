//! End-to-end run: input CSV in, `valid.csv` / `invalid.csv` out.
//!
//! Most callers should use [`run_from_path`], which
//!
//! - checks the output directory exists and is readable and writable
//! - checks and reads the input file
//! - partitions the records with the configured [`Classifier`]
//! - writes both outputs
//! - reports success/failure/alerts to the configured [`RunObserver`], if any

use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::{FilterError, FilterResult};
use crate::ingestion::csv::{DEFAULT_DELIMITER, read_records_from_path, read_records_from_reader, reader_builder};
use crate::observability::{RunContext, RunObserver, RunStats, Severity};
use crate::output::{OutputMode, write_partition, write_partition_files};
use crate::processing::{Classifier, Partition, partition};

/// File name of the valid-ids output.
pub const VALID_FILE_NAME: &str = "valid.csv";
/// File name of the invalid-ids output.
pub const INVALID_FILE_NAME: &str = "invalid.csv";

/// Options controlling a run.
///
/// Use [`Default`] for the built-in clip rules.
#[derive(Clone)]
pub struct RunOptions {
    /// Rule list and accessors used to classify records.
    pub classifier: Classifier,
    /// Input field delimiter.
    pub delimiter: u8,
    /// File name of the valid output inside the output directory.
    pub valid_file_name: String,
    /// File name of the invalid output inside the output directory.
    pub invalid_file_name: String,
    /// How output files are put in place.
    pub output_mode: OutputMode,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn RunObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("classifier", &self.classifier)
            .field("delimiter", &(self.delimiter as char))
            .field("valid_file_name", &self.valid_file_name)
            .field("invalid_file_name", &self.invalid_file_name)
            .field("output_mode", &self.output_mode)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            classifier: Classifier::clips(),
            delimiter: DEFAULT_DELIMITER,
            valid_file_name: VALID_FILE_NAME.to_string(),
            invalid_file_name: INVALID_FILE_NAME.to_string(),
            output_mode: OutputMode::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Check that `dir` is a directory this process can list and create files in.
pub fn check_output_dir(dir: &Path) -> FilterResult<()> {
    let is_dir = match std::fs::metadata(dir) {
        Ok(meta) => meta.is_dir(),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => false,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(FilterError::PermissionDenied {
                path: dir.to_path_buf(),
            });
        }
        Err(e) => return Err(FilterError::Io(e)),
    };
    if !is_dir {
        return Err(FilterError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let denied = |e: std::io::Error| match e.kind() {
        ErrorKind::PermissionDenied => FilterError::PermissionDenied {
            path: dir.to_path_buf(),
        },
        _ => FilterError::Io(e),
    };
    std::fs::read_dir(dir).map_err(denied)?;
    // Probe with an anonymous file; it is removed when dropped.
    tempfile::tempfile_in(dir).map_err(denied)?;
    Ok(())
}

/// Run the filter over `input`, writing both outputs into `output_dir`.
///
/// # Examples
///
/// ```no_run
/// use clip_filter::pipeline::{run_from_path, RunOptions};
///
/// # fn main() -> Result<(), clip_filter::FilterError> {
/// let stats = run_from_path("clips.csv", "out", &RunOptions::default())?;
/// println!("valid={} invalid={}", stats.valid, stats.invalid);
/// # Ok(())
/// # }
/// ```
///
/// Custom rules and in-place writes:
///
/// ```no_run
/// use clip_filter::output::OutputMode;
/// use clip_filter::pipeline::{run_from_path, RunOptions};
/// use clip_filter::processing::Classifier;
/// use clip_filter::rules::{load_rules_from_path, FieldAccessors};
///
/// # fn main() -> Result<(), clip_filter::FilterError> {
/// let opts = RunOptions {
///     classifier: Classifier::new(load_rules_from_path("rules.json")?, FieldAccessors::clips()),
///     output_mode: OutputMode::InPlace,
///     ..Default::default()
/// };
/// run_from_path("clips.csv", "out", &opts)?;
/// # Ok(())
/// # }
/// ```
pub fn run_from_path(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &RunOptions,
) -> FilterResult<RunStats> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    let ctx = RunContext {
        input: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
    };

    let result = run_inner(input, output_dir, options);

    if let Some(observer) = &options.observer {
        match &result {
            Ok(stats) => observer.on_success(&ctx, *stats),
            Err(e) => {
                let severity = Severity::of(e);
                observer.on_failure(&ctx, severity, e);
                if severity >= options.alert_at_or_above {
                    observer.on_alert(&ctx, severity, e);
                }
            }
        }
    }

    result
}

fn run_inner(input: &Path, output_dir: &Path, options: &RunOptions) -> FilterResult<RunStats> {
    check_output_dir(output_dir)?;

    let records = read_records_from_path(input, options.delimiter)?;
    let record_count = records.len();
    let partition = partition(records, &options.classifier)?;
    tracing::debug!(
        valid = partition.valid.len(),
        invalid = partition.invalid.len(),
        "partitioned records"
    );

    write_partition_files(
        &partition,
        &output_dir.join(&options.valid_file_name),
        &output_dir.join(&options.invalid_file_name),
        options.output_mode,
    )?;

    Ok(stats_of(record_count, &partition))
}

/// Run the filter over CSV read from `input`, writing the id lists to the given sinks.
///
/// No file checks are made and no observer is notified.
pub fn run_on_reader<R, W1, W2>(
    input: R,
    valid_sink: &mut W1,
    invalid_sink: &mut W2,
    options: &RunOptions,
) -> FilterResult<RunStats>
where
    R: Read,
    W1: Write,
    W2: Write,
{
    let mut rdr = reader_builder(options.delimiter).from_reader(input);
    let records = read_records_from_reader(&mut rdr)?;
    let record_count = records.len();
    let partition = partition(records, &options.classifier)?;
    write_partition(&partition.valid, &partition.invalid, valid_sink, invalid_sink)?;
    Ok(stats_of(record_count, &partition))
}

fn stats_of(records: usize, partition: &Partition) -> RunStats {
    RunStats {
        records,
        valid: partition.valid.len(),
        invalid: partition.invalid.len(),
    }
}
