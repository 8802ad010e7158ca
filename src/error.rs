use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for filtering operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error type returned across ingestion, classification and output.
///
/// No variant is recovered from inside the crate: every error aborts the run and is surfaced
/// to the caller of [`crate::pipeline::run_from_path`] (or the CLI) for display.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The input path does not exist.
    #[error("file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The path resolves to something other than a regular file (e.g. a directory).
    #[error("'{}' is not a file", path.display())]
    NotAFile { path: PathBuf },

    /// The output destination is not a directory.
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// The input file exists but cannot be read.
    #[error("'{}' is not readable", path.display())]
    FileNotReadable { path: PathBuf },

    /// An existing output file cannot be written.
    #[error("'{}' is not writable", path.display())]
    FileNotWritable { path: PathBuf },

    /// The output directory lacks read or write permission.
    #[error("permission denied for directory '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// A rule uses an operator outside the recognised set.
    #[error("{operator} operator not supported")]
    UnsupportedOperator { operator: String },

    /// An ordering comparison between values that cannot be ordered against each other.
    ///
    /// `attribute` and `record_id` are empty until the rule and the record are known.
    #[error(
        "cannot compare {value} with {operand} using '{operator}'{}",
        mismatch_location(.attribute, .record_id)
    )]
    TypeMismatch {
        operator: String,
        value: String,
        operand: String,
        attribute: String,
        record_id: String,
    },

    /// A rule refers to a field the record does not have.
    #[error("record has no field '{field}'")]
    MissingField { field: String },

    /// The input does not have the shape required for output (e.g. no `id` column).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Writing to an output sink failed.
    #[error("failed to write output: {0}")]
    SinkWrite(#[source] std::io::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Rule list could not be decoded.
    #[error("invalid rule list: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    /// Names the rule attribute on a [`FilterError::TypeMismatch`] that lacks one.
    pub fn in_field(mut self, field: &str) -> Self {
        if let Self::TypeMismatch { attribute, .. } = &mut self {
            if attribute.is_empty() {
                *attribute = field.to_owned();
            }
        }
        self
    }

    /// Names the offending record on a [`FilterError::TypeMismatch`] that lacks one.
    pub fn in_record(mut self, id: &str) -> Self {
        if let Self::TypeMismatch { record_id, .. } = &mut self {
            if record_id.is_empty() {
                *record_id = id.to_owned();
            }
        }
        self
    }
}

fn mismatch_location(attribute: &str, record_id: &str) -> String {
    match (attribute.is_empty(), record_id.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!(" (field '{attribute}')"),
        (true, false) => format!(" (record id {record_id})"),
        (false, false) => format!(" (field '{attribute}', record id {record_id})"),
    }
}
