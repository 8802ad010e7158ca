//! A single rejection rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::types::Value;

use super::compare;

/// The recognised comparison operators.
///
/// Both the named spelling (`strict_neq`) and the symbolic spelling (`!==`) parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `eq` / `==`: loose equality.
    Eq,
    /// `neq` / `!=`: negation of loose equality.
    Neq,
    /// `strict_eq` / `===`: type and value equality.
    StrictEq,
    /// `strict_neq` / `!==`: negation of strict equality.
    StrictNeq,
    /// `gte` / `>=`.
    Gte,
    /// `lte` / `<=`.
    Lte,
    /// `gt` / `>`.
    Gt,
    /// `lt` / `<`.
    Lt,
}

impl ComparisonOp {
    /// All operators, in declaration order.
    pub const ALL: [ComparisonOp; 8] = [
        Self::Eq,
        Self::Neq,
        Self::StrictEq,
        Self::StrictNeq,
        Self::Gte,
        Self::Lte,
        Self::Gt,
        Self::Lt,
    ];

    /// Named spelling, e.g. `strict_neq`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::StrictEq => "strict_eq",
            Self::StrictNeq => "strict_neq",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Lt => "lt",
        }
    }

    /// Symbolic spelling, e.g. `!==`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::StrictEq => "===",
            Self::StrictNeq => "!==",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

impl FromStr for ComparisonOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s || op.symbol() == s)
            .ok_or_else(|| FilterError::UnsupportedOperator {
                operator: s.to_owned(),
            })
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A rejection predicate: `attribute operator operand`.
///
/// The operator is stored as written and only checked when the rule is evaluated, so a rule
/// list with a bad operator loads fine and fails the run on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    attribute: String,
    operator: String,
    operand: Value,
}

impl Rule {
    pub fn new(
        attribute: impl Into<String>,
        operator: impl Into<String>,
        operand: impl Into<Value>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator: operator.into(),
            operand: operand.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn operand(&self) -> &Value {
        &self.operand
    }

    pub fn set_attribute(&mut self, attribute: impl Into<String>) {
        self.attribute = attribute.into();
    }

    pub fn set_operator(&mut self, operator: impl Into<String>) {
        self.operator = operator.into();
    }

    pub fn set_operand(&mut self, operand: impl Into<Value>) {
        self.operand = operand.into();
    }

    /// Parses the stored operator.
    pub fn comparison_op(&self) -> FilterResult<ComparisonOp> {
        self.operator.parse()
    }

    /// Returns whether `value` satisfies this rule's constraint.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnsupportedOperator`] if the operator is not recognised.
    /// - [`FilterError::TypeMismatch`] if an ordering operator cannot order `value` against the
    ///   operand.
    pub fn evaluate(&self, value: &Value) -> FilterResult<bool> {
        compare::compare(self.comparison_op()?, value, &self.operand).map_err(|e| e.in_field(&self.attribute))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator, self.operand)
    }
}
