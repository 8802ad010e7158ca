//! Rules, comparison semantics and field accessors.
//!
//! A [`Rule`] is a rejection predicate: a record that satisfies any rule in a list is invalid.
//! Rule lists are literal: either [`clip_rules`] or a JSON array of rule objects loaded with
//! [`load_rules_from_path`]:
//!
//! ```json
//! [
//!   { "attribute": "privacy", "operator": "strict_neq", "operand": "anybody" },
//!   { "attribute": "total_likes", "operator": "<=", "operand": 10 }
//! ]
//! ```
//!
//! ```rust
//! use clip_filter::rules::{clip_rules, Rule};
//! use clip_filter::types::Value;
//!
//! let rules = clip_rules();
//! assert_eq!(rules.len(), 4);
//!
//! let likes = Rule::new("total_likes", "lte", 10);
//! assert!(likes.evaluate(&Value::from("5")).unwrap());
//! ```

pub mod accessor;
pub mod builtin;
pub mod compare;
pub mod rule;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{FilterError, FilterResult};
use crate::ingestion::csv::check_readable_file;

pub use accessor::{CharLength, FieldAccessor, FieldAccessors, RawField};
pub use builtin::clip_rules;
pub use rule::{ComparisonOp, Rule};

/// Decode a rule list from a JSON array.
pub fn load_rules_from_reader<R: Read>(reader: R) -> FilterResult<Vec<Rule>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Decode a rule list from a JSON file.
///
/// Operators are not validated here; an unknown operator fails when the rule is first evaluated.
pub fn load_rules_from_path(path: impl AsRef<Path>) -> FilterResult<Vec<Rule>> {
    let path = path.as_ref();
    check_readable_file(path)?;
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FilterError::FileNotReadable {
            path: path.to_path_buf(),
        },
        _ => FilterError::Io(e),
    })?;
    load_rules_from_reader(BufReader::new(file))
}
