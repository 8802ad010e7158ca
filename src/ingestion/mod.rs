//! Ingestion of clip exports.
//!
//! [`csv::read_records_from_path`] performs the input file checks (exists, is a file, is
//! readable) and parses the whole file into [`crate::types::Record`]s.

pub mod csv;

pub use self::csv::{DEFAULT_DELIMITER, read_records_from_path, read_records_from_reader};
