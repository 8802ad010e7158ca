//! Core data model types.
//!
//! An input file is read into a list of [`Record`]s that share one [`Schema`] (the header row).
//! Records keep the raw cell text; typed [`Value`]s are produced on demand when a rule needs
//! to compare a field.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// Name of the identity column written to both outputs.
pub const ID_FIELD: &str = "id";

/// The ordered list of field names taken from an input header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Field/column names in file order.
    pub fields: Vec<String>,
}

impl Schema {
    /// Create a new schema from field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }
}

/// A single typed value used in rule comparisons.
///
/// Deserializes untagged, so a rule operand in JSON can be written as `10`, `"anybody"`,
/// `2.5`, `true` or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Map a raw CSV cell to a value. Empty cells become [`Value::Null`]; anything else is kept
    /// verbatim as [`Value::Utf8`].
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Null
        } else {
            Self::Utf8(raw.to_owned())
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int64(_) => "int",
            Self::Float64(_) => "float",
            Self::Utf8(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Utf8(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Utf8(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Utf8(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// One input row, aligned positionally to its [`Schema`].
///
/// Records are immutable once read. Cloning is cheap for the schema (shared) and copies the
/// row's cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<String>,
}

impl Record {
    /// Create a record from a shared schema and the row's raw cells.
    ///
    /// Missing trailing cells read as empty; extra cells are kept but unreachable by name.
    pub fn new(schema: Arc<Schema>, values: Vec<String>) -> Self {
        Self { schema, values }
    }

    /// Build a record from `(field, raw)` pairs. Convenient for tests and small inputs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (fields, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .unzip();
        Self::new(Arc::new(Schema::new(fields)), values)
    }

    /// The schema this record was read with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Raw cell text for `field`, if the schema has it.
    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.schema.index_of(field)?;
        Some(self.values.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Raw cell text for `field`, failing with [`FilterError::MissingField`] when absent.
    pub fn require(&self, field: &str) -> FilterResult<&str> {
        self.get(field).ok_or_else(|| FilterError::MissingField {
            field: field.to_owned(),
        })
    }

    /// The record's identity, written verbatim to the outputs.
    pub fn id(&self) -> FilterResult<&str> {
        self.require(ID_FIELD)
    }

    /// Raw cells in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_index_of_works() {
        let schema = Schema::new(["id", "privacy", "title"]);
        assert_eq!(schema.index_of("id"), Some(0));
        assert_eq!(schema.index_of("title"), Some(2));
        assert_eq!(schema.index_of("missing"), None);
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["id", "privacy", "title"]);
    }

    #[test]
    fn record_lookup_by_name() {
        let r = Record::from_pairs([("id", "7"), ("privacy", "anybody")]);
        assert_eq!(r.get("privacy"), Some("anybody"));
        assert_eq!(r.id().unwrap(), "7");
        assert_eq!(r.get("title"), None);
    }

    #[test]
    fn short_row_reads_missing_cells_as_empty() {
        let schema = Arc::new(Schema::new(["id", "title"]));
        let r = Record::new(schema, vec!["1".to_string()]);
        assert_eq!(r.get("title"), Some(""));
    }

    #[test]
    fn require_reports_missing_field() {
        let r = Record::from_pairs([("id", "1")]);
        let err = r.require("total_likes").unwrap_err();
        assert!(matches!(err, FilterError::MissingField { ref field } if field == "total_likes"));
    }

    #[test]
    fn raw_cells_map_to_values() {
        assert_eq!(Value::from_raw(""), Value::Null);
        assert_eq!(Value::from_raw("  "), Value::Utf8("  ".to_string()));
        assert_eq!(Value::from_raw("42"), Value::Utf8("42".to_string()));
    }

    #[test]
    fn operand_json_is_untagged() {
        let v: Vec<Value> = serde_json::from_str(r#"[10, "anybody", 2.5, true, null]"#).unwrap();
        assert_eq!(
            v,
            vec![
                Value::Int64(10),
                Value::Utf8("anybody".to_string()),
                Value::Float64(2.5),
                Value::Bool(true),
                Value::Null,
            ]
        );
    }
}
