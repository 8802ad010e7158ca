//! Run outcome reporting.
//!
//! [`crate::pipeline::run_from_path`] reports to an optional [`RunObserver`]: `on_success`
//! with partition counts, `on_failure` with a computed [`Severity`], and `on_alert` when the
//! severity meets the configured threshold.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::FilterError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Error-level event: the input or rule list is bad.
    Error,
    /// Critical error: file system or other infrastructure failures.
    Critical,
}

impl Severity {
    /// Severity of a run-aborting error.
    pub fn of(error: &FilterError) -> Self {
        match error {
            FilterError::UnsupportedOperator { .. }
            | FilterError::TypeMismatch { .. }
            | FilterError::MissingField { .. }
            | FilterError::SchemaMismatch { .. }
            | FilterError::Csv(_)
            | FilterError::Json(_) => Self::Error,
            FilterError::FileNotFound { .. }
            | FilterError::NotAFile { .. }
            | FilterError::NotADirectory { .. }
            | FilterError::FileNotReadable { .. }
            | FilterError::FileNotWritable { .. }
            | FilterError::PermissionDenied { .. }
            | FilterError::SinkWrite(_)
            | FilterError::Io(_) => Self::Critical,
        }
    }
}

/// Context about a run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The input CSV path.
    pub input: PathBuf,
    /// The output directory.
    pub output_dir: PathBuf,
}

/// Counts reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Number of records read.
    pub records: usize,
    /// Number of records written to the valid output.
    pub valid: usize,
    /// Number of records written to the invalid output.
    pub invalid: usize,
}

/// Observer interface for run outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait RunObserver: Send + Sync {
    /// Called when a run succeeds.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &FilterError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn RunObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl RunObserver for CompositeObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits run events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        tracing::info!(
            input = %ctx.input.display(),
            output_dir = %ctx.output_dir.display(),
            records = stats.records,
            valid = stats.valid,
            invalid = stats.invalid,
            "clips partitioned"
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        tracing::debug!(input = %ctx.input.display(), ?severity, %error, "run failed");
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        tracing::warn!(input = %ctx.input.display(), ?severity, %error, "run failed");
    }
}

/// Appends run events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl RunObserver for FileObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok input={} records={} valid={} invalid={}",
            unix_ts(),
            ctx.input.display(),
            stats.records,
            stats.valid,
            stats.invalid
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} input={} err={error}",
            unix_ts(),
            ctx.input.display()
        ));
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} input={} err={error}",
            unix_ts(),
            ctx.input.display()
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_errors_are_not_critical() {
        let err = FilterError::UnsupportedOperator {
            operator: "~=".to_string(),
        };
        assert_eq!(Severity::of(&err), Severity::Error);
        let err = FilterError::FileNotFound {
            path: PathBuf::from("clips.csv"),
        };
        assert_eq!(Severity::of(&err), Severity::Critical);
        assert!(Severity::Critical > Severity::Error);
    }

    #[test]
    fn file_observer_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("run.log");
        let obs = FileObserver::new(&log);
        let ctx = RunContext {
            input: PathBuf::from("clips.csv"),
            output_dir: dir.path().to_path_buf(),
        };
        obs.on_success(&ctx, RunStats { records: 3, valid: 2, invalid: 1 });
        obs.on_alert(
            &ctx,
            Severity::Critical,
            &FilterError::NotADirectory {
                path: PathBuf::from("out"),
            },
        );

        let text = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ok input=clips.csv records=3 valid=2 invalid=1"));
        assert!(lines[1].contains("ALERT severity=Critical"));
        assert!(lines[1].contains("'out' is not a directory"));
    }
}
