//! Writing the partition as two id-only CSV outputs.
//!
//! Each output has the header line `id` followed by one id per line, written verbatim in
//! arrival order, using the platform line terminator.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{FilterError, FilterResult};
use crate::processing::Partition;
use crate::types::{ID_FIELD, Record};

/// Line terminator written after every output line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator written after every output line.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// How output files are put in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write to a temporary file in the target directory and rename it over the target once
    /// complete. A failed run leaves existing outputs untouched.
    #[default]
    Atomic,
    /// Truncate and write the targets directly. A failed run can leave partial files.
    InPlace,
}

fn write_line<W: Write>(sink: &mut W, line: &str) -> FilterResult<()> {
    sink.write_all(line.as_bytes())
        .and_then(|()| sink.write_all(LINE_ENDING.as_bytes()))
        .map_err(FilterError::SinkWrite)
}

fn write_id_lines<'a, W, I>(records: I, sink: &mut W) -> FilterResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut written = 0;
    for record in records {
        write_line(sink, record.id()?)?;
        written += 1;
    }
    Ok(written)
}

/// Write the `id` header and one id per record to `sink`. Returns the number of ids written.
pub fn write_ids<'a, W, I>(records: I, sink: &mut W) -> FilterResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    write_line(sink, ID_FIELD)?;
    let written = write_id_lines(records, sink)?;
    sink.flush().map_err(FilterError::SinkWrite)?;
    Ok(written)
}

/// Write both outputs: headers to both sinks, then the valid ids, then the invalid ids.
pub fn write_partition<'a, V, N, W1, W2>(
    valid: V,
    invalid: N,
    valid_sink: &mut W1,
    invalid_sink: &mut W2,
) -> FilterResult<()>
where
    V: IntoIterator<Item = &'a Record>,
    N: IntoIterator<Item = &'a Record>,
    W1: Write,
    W2: Write,
{
    write_line(valid_sink, ID_FIELD)?;
    write_line(invalid_sink, ID_FIELD)?;
    write_id_lines(valid, valid_sink)?;
    write_id_lines(invalid, invalid_sink)?;
    valid_sink.flush().map_err(FilterError::SinkWrite)?;
    invalid_sink.flush().map_err(FilterError::SinkWrite)?;
    Ok(())
}

/// If `path` already exists it must be a writable regular file.
pub fn check_writable_target(path: &Path) -> FilterResult<()> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(FilterError::Io(e)),
    };
    if !meta.is_file() {
        return Err(FilterError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(FilterError::FileNotWritable {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(FilterError::Io(e)),
    }
}

fn target_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn staging_file(target: &Path) -> FilterResult<NamedTempFile> {
    let dir = target_dir(target);
    let tmp = tempfile::Builder::new()
        .prefix(".clip-filter-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => FilterError::PermissionDenied {
                path: dir.to_path_buf(),
            },
            _ => FilterError::Io(e),
        })?;
    // Temp files are created owner-only; outputs should look like any other created file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    Ok(tmp)
}

fn create_in_place(target: &Path) -> FilterResult<File> {
    File::create(target).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => FilterError::FileNotWritable {
            path: target.to_path_buf(),
        },
        _ => FilterError::Io(e),
    })
}

/// Write `partition` to `valid_path` and `invalid_path`.
///
/// Existing targets are overwritten. Both targets are checked with [`check_writable_target`]
/// before anything is written. File handles are closed on every return path.
pub fn write_partition_files(
    partition: &Partition,
    valid_path: &Path,
    invalid_path: &Path,
    mode: OutputMode,
) -> FilterResult<()> {
    check_writable_target(valid_path)?;
    check_writable_target(invalid_path)?;

    match mode {
        OutputMode::InPlace => {
            let mut valid_sink = BufWriter::new(create_in_place(valid_path)?);
            let mut invalid_sink = BufWriter::new(create_in_place(invalid_path)?);
            write_partition(&partition.valid, &partition.invalid, &mut valid_sink, &mut invalid_sink)
        }
        OutputMode::Atomic => {
            let mut valid_tmp = staging_file(valid_path)?;
            let mut invalid_tmp = staging_file(invalid_path)?;
            {
                let mut valid_sink = BufWriter::new(valid_tmp.as_file_mut());
                let mut invalid_sink = BufWriter::new(invalid_tmp.as_file_mut());
                write_partition(&partition.valid, &partition.invalid, &mut valid_sink, &mut invalid_sink)?;
            }
            valid_tmp
                .persist(valid_path)
                .map_err(|e| FilterError::SinkWrite(e.error))?;
            invalid_tmp
                .persist(invalid_path)
                .map_err(|e| FilterError::SinkWrite(e.error))?;
            Ok(())
        }
    }
}
