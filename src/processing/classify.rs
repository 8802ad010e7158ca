//! Rule-list evaluation for a single record.

use crate::error::FilterResult;
use crate::rules::{FieldAccessors, Rule, clip_rules};
use crate::types::Record;

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No rule held.
    Valid,
    /// At least one rule held.
    Invalid,
}

impl Classification {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Classify `record` against `rules`.
///
/// Rules are tried in order; the first rule that holds makes the record
/// [`Classification::Invalid`] and the remaining rules are not evaluated. Errors from value
/// resolution or rule evaluation are returned as-is.
pub fn classify(record: &Record, rules: &[Rule], accessors: &FieldAccessors) -> FilterResult<Classification> {
    for rule in rules {
        let value = accessors.resolve(record, rule.attribute())?;
        let holds = rule
            .evaluate(&value)
            .map_err(|e| e.in_record(record.id().unwrap_or_default()))?;
        if holds {
            tracing::trace!(rule = %rule, "record rejected");
            return Ok(Classification::Invalid);
        }
    }
    Ok(Classification::Valid)
}

/// A rule list bundled with the accessors used to resolve its attributes.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<Rule>,
    accessors: FieldAccessors,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>, accessors: FieldAccessors) -> Self {
        Self { rules, accessors }
    }

    /// The built-in clip rules with the clip accessors.
    pub fn clips() -> Self {
        Self::new(clip_rules(), FieldAccessors::clips())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn accessors(&self) -> &FieldAccessors {
        &self.accessors
    }

    pub fn classify(&self, record: &Record) -> FilterResult<Classification> {
        classify(record, &self.rules, &self.accessors)
    }
}
