//! CSV ingestion implementation.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::{FilterError, FilterResult};
use crate::types::{ID_FIELD, Record, Schema};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Reader settings used for clip exports: a header row, strict field counts, and any of
/// CR, LF or CRLF as the record terminator.
pub fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(false)
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF);
    builder
}

/// Check that `path` exists and is a regular file.
pub fn check_readable_file(path: &Path) -> FilterResult<()> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(FilterError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(FilterError::FileNotReadable {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(FilterError::Io(e)),
    };
    if !meta.is_file() {
        return Err(FilterError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Open an input file for reading after the existence/type checks.
pub fn open_input(path: &Path) -> FilterResult<File> {
    check_readable_file(path)?;
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => FilterError::FileNotReadable {
            path: path.to_path_buf(),
        },
        _ => FilterError::Io(e),
    })
}

/// Read every record of a CSV file into memory.
///
/// Rules:
///
/// - The first row is the header; each later row aligns positionally to it.
/// - The header must contain an `id` column.
/// - A row with a different field count than the header is an error.
/// - A completely empty file yields no records.
pub fn read_records_from_path(path: impl AsRef<Path>, delimiter: u8) -> FilterResult<Vec<Record>> {
    let path = path.as_ref();
    let file = open_input(path)?;
    let mut rdr = reader_builder(delimiter).from_reader(BufReader::new(file));
    let records = read_records_from_reader(&mut rdr)?;
    tracing::debug!(path = %path.display(), records = records.len(), "read input");
    Ok(records)
}

/// Read records from an existing CSV reader.
pub fn read_records_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> FilterResult<Vec<Record>> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let schema = Arc::new(Schema::new(headers.iter()));
    if schema.index_of(ID_FIELD).is_none() {
        return Err(FilterError::SchemaMismatch {
            message: format!(
                "missing required column '{ID_FIELD}'. headers={:?}",
                schema.fields
            ),
        });
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(Record::new(
            Arc::clone(&schema),
            row.iter().map(str::to_owned).collect(),
        ));
    }
    Ok(records)
}
