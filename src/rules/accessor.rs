//! Per-attribute value resolution.
//!
//! Before a rule is evaluated, the value it compares is looked up through the accessor
//! registered for the rule's attribute. Attributes without a registered accessor use
//! [`RawField`]. Derived fields (such as the clip title's length) are added by registering
//! another accessor, without touching the classifier.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::FilterResult;
use crate::types::{Record, Value};

/// Resolves the comparison value for `attribute` from a record.
pub trait FieldAccessor: Send + Sync {
    fn resolve(&self, record: &Record, attribute: &str) -> FilterResult<Value>;
}

impl<F> FieldAccessor for F
where
    F: Fn(&Record, &str) -> FilterResult<Value> + Send + Sync,
{
    fn resolve(&self, record: &Record, attribute: &str) -> FilterResult<Value> {
        self(record, attribute)
    }
}

/// The raw cell, via [`Value::from_raw`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RawField;

impl FieldAccessor for RawField {
    fn resolve(&self, record: &Record, attribute: &str) -> FilterResult<Value> {
        record.require(attribute).map(Value::from_raw)
    }
}

/// Length of the cell in characters (Unicode scalar values), as [`Value::Int64`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CharLength;

impl FieldAccessor for CharLength {
    fn resolve(&self, record: &Record, attribute: &str) -> FilterResult<Value> {
        let raw = record.require(attribute)?;
        Ok(Value::Int64(raw.chars().count() as i64))
    }
}

/// Registry mapping attribute names to accessors.
#[derive(Clone, Default)]
pub struct FieldAccessors {
    by_attribute: BTreeMap<String, Arc<dyn FieldAccessor>>,
}

impl FieldAccessors {
    /// Empty registry: every attribute resolves through [`RawField`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Accessors for clip exports: `title` compares by its length.
    pub fn clips() -> Self {
        Self::new().with("title", CharLength)
    }

    /// Register `accessor` for `attribute`, replacing any previous one.
    pub fn register(&mut self, attribute: impl Into<String>, accessor: impl FieldAccessor + 'static) {
        self.by_attribute.insert(attribute.into(), Arc::new(accessor));
    }

    /// Builder form of [`Self::register`].
    pub fn with(mut self, attribute: impl Into<String>, accessor: impl FieldAccessor + 'static) -> Self {
        self.register(attribute, accessor);
        self
    }

    /// Whether `attribute` has a non-default accessor.
    pub fn is_derived(&self, attribute: &str) -> bool {
        self.by_attribute.contains_key(attribute)
    }

    /// Resolve the comparison value for `attribute`.
    pub fn resolve(&self, record: &Record, attribute: &str) -> FilterResult<Value> {
        match self.by_attribute.get(attribute) {
            Some(accessor) => accessor.resolve(record, attribute),
            None => RawField.resolve(record, attribute),
        }
    }
}

impl fmt::Debug for FieldAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessors")
            .field("derived", &self.by_attribute.keys().collect::<Vec<_>>())
            .finish()
    }
}
