//! Comparison semantics for the eight rule operators.
//!
//! Coercion rules:
//!
//! - A value is *numeric-looking* if it is [`Value::Int64`], [`Value::Float64`], or a
//!   [`Value::Utf8`] whose trimmed text parses as a finite `i64`/`f64`.
//! - Two integers compare exactly; any other numeric pair compares as `f64`.
//! - `eq`/`neq` compare numerically when both sides are numeric-looking, otherwise strings
//!   compare byte-wise, bools compare by value, and `Null` equals only `Null`. Any other
//!   pairing is unequal.
//! - `strict_eq`/`strict_neq` never coerce: the variant and the payload must both match.
//! - `gt`/`gte`/`lt`/`lte` are governed by the operand. Numeric operands require a
//!   numeric-looking value. A string operand orders numerically when both sides are
//!   numeric-looking, otherwise lexicographically against a string value. Everything else is
//!   a [`FilterError::TypeMismatch`]. NaN never satisfies an ordering.

use std::cmp::Ordering;

use crate::error::{FilterError, FilterResult};
use crate::types::Value;

use super::rule::ComparisonOp;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    fn partial_cmp(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int64(v) => Some(Number::Int(*v)),
        Value::Float64(v) => Some(Number::Float(*v)),
        Value::Utf8(s) => parse_number(s),
        Value::Null | Value::Bool(_) => None,
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(Number::Int(v));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(Number::Float(v)),
        _ => None,
    }
}

/// Loose equality with numeric coercion.
pub fn loose_eq(value: &Value, operand: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_number(value), as_number(operand)) {
        return a.partial_cmp(b) == Some(Ordering::Equal);
    }
    match (value, operand) {
        (Value::Utf8(a), Value::Utf8(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Type-and-value equality, no coercion.
pub fn strict_eq(value: &Value, operand: &Value) -> bool {
    value == operand
}

/// Orders `value` against `operand`.
///
/// `Ok(None)` means the pair is comparable in type but unordered (NaN).
pub fn order(op: ComparisonOp, value: &Value, operand: &Value) -> FilterResult<Option<Ordering>> {
    let mismatch = || FilterError::TypeMismatch {
        operator: op.symbol().to_owned(),
        value: describe(value),
        operand: describe(operand),
        attribute: String::new(),
        record_id: String::new(),
    };

    match operand {
        Value::Int64(_) | Value::Float64(_) => {
            let rhs = as_number(operand).ok_or_else(mismatch)?;
            let lhs = as_number(value).ok_or_else(mismatch)?;
            Ok(lhs.partial_cmp(rhs))
        }
        Value::Utf8(rhs) => {
            if let (Some(a), Some(b)) = (as_number(value), as_number(operand)) {
                return Ok(a.partial_cmp(b));
            }
            match value {
                Value::Utf8(lhs) => Ok(Some(lhs.as_str().cmp(rhs.as_str()))),
                _ => Err(mismatch()),
            }
        }
        Value::Null | Value::Bool(_) => Err(mismatch()),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "empty value".to_owned(),
        _ => format!("{} {value}", value.kind()),
    }
}

/// Applies `op` to `value` and `operand`.
pub fn compare(op: ComparisonOp, value: &Value, operand: &Value) -> FilterResult<bool> {
    let holds = match op {
        ComparisonOp::Eq => loose_eq(value, operand),
        ComparisonOp::Neq => !loose_eq(value, operand),
        ComparisonOp::StrictEq => strict_eq(value, operand),
        ComparisonOp::StrictNeq => !strict_eq(value, operand),
        ComparisonOp::Gte => matches!(
            order(op, value, operand)?,
            Some(Ordering::Greater | Ordering::Equal)
        ),
        ComparisonOp::Lte => matches!(
            order(op, value, operand)?,
            Some(Ordering::Less | Ordering::Equal)
        ),
        ComparisonOp::Gt => order(op, value, operand)? == Some(Ordering::Greater),
        ComparisonOp::Lt => order(op, value, operand)? == Some(Ordering::Less),
    };
    Ok(holds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    #[test]
    fn loose_eq_coerces_numeric_strings() {
        assert!(loose_eq(&s("10"), &Value::Int64(10)));
        assert!(loose_eq(&s(" 10 "), &Value::Int64(10)));
        assert!(loose_eq(&s("10.0"), &Value::Int64(10)));
        assert!(loose_eq(&s("1e1"), &s("10")));
        assert!(!loose_eq(&s("ten"), &Value::Int64(10)));
    }

    #[test]
    fn loose_eq_falls_back_to_same_kind() {
        assert!(loose_eq(&s("anybody"), &s("anybody")));
        assert!(!loose_eq(&s("Anybody"), &s("anybody")));
        assert!(loose_eq(&Value::Bool(true), &Value::Bool(true)));
        assert!(loose_eq(&Value::Null, &Value::Null));
        assert!(!loose_eq(&Value::Null, &s("")));
        assert!(!loose_eq(&Value::Bool(true), &s("true")));
    }

    #[test]
    fn strict_eq_does_not_coerce() {
        assert!(strict_eq(&s("anybody"), &s("anybody")));
        assert!(!strict_eq(&s("5"), &Value::Int64(5)));
        assert!(!strict_eq(&Value::Int64(5), &Value::Float64(5.0)));
        assert!(strict_eq(&Value::Int64(5), &Value::Int64(5)));
    }

    #[test]
    fn numeric_operand_orders_numeric_strings() {
        assert!(compare(ComparisonOp::Lte, &s("5"), &Value::Int64(10)).unwrap());
        assert!(compare(ComparisonOp::Lte, &s("10"), &Value::Int64(10)).unwrap());
        assert!(!compare(ComparisonOp::Lte, &s("11"), &Value::Int64(10)).unwrap());
        // Numeric, not lexicographic: "9" < "10".
        assert!(compare(ComparisonOp::Lt, &s("9"), &Value::Int64(10)).unwrap());
        assert!(compare(ComparisonOp::Gt, &s("10.5"), &Value::Int64(10)).unwrap());
    }

    #[test]
    fn large_integers_compare_exactly() {
        let big = i64::MAX;
        assert!(!compare(ComparisonOp::Gt, &Value::Int64(big), &Value::Int64(big)).unwrap());
        assert!(compare(ComparisonOp::Gt, &Value::Int64(big), &Value::Int64(big - 1)).unwrap());
    }

    #[test]
    fn string_operand_orders_lexicographically() {
        assert!(compare(ComparisonOp::Lt, &s("apple"), &s("banana")).unwrap());
        assert!(compare(ComparisonOp::Gte, &s("b"), &s("b")).unwrap());
        // Both numeric-looking: numeric ordering wins.
        assert!(compare(ComparisonOp::Lt, &s("9"), &s("10")).unwrap());
    }

    #[test]
    fn ordering_mismatch_is_an_error() {
        let err = compare(ComparisonOp::Lte, &s("lots"), &Value::Int64(10)).unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { .. }));
        assert!(err.to_string().contains("<="));

        let err = compare(ComparisonOp::Gt, &Value::Null, &Value::Int64(1)).unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { .. }));
        assert_eq!(err.to_string(), "cannot compare empty value with int 1 using '>'");

        let err = compare(ComparisonOp::Gt, &Value::Int64(1), &s("abc")).unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { .. }));

        let err = compare(ComparisonOp::Lt, &s("x"), &Value::Bool(true)).unwrap_err();
        assert!(matches!(err, FilterError::TypeMismatch { .. }));
    }

    #[test]
    fn equality_never_fails_on_mixed_types() {
        assert!(compare(ComparisonOp::Neq, &Value::Null, &Value::Int64(1)).unwrap());
        assert!(compare(ComparisonOp::StrictNeq, &s("friends"), &s("anybody")).unwrap());
        assert!(!compare(ComparisonOp::StrictNeq, &s("anybody"), &s("anybody")).unwrap());
    }

    #[test]
    fn nan_never_satisfies_ordering() {
        let nan = Value::Float64(f64::NAN);
        assert!(!compare(ComparisonOp::Gte, &nan, &Value::Int64(0)).unwrap());
        assert!(!compare(ComparisonOp::Lt, &nan, &Value::Int64(0)).unwrap());
        // "NaN" text is not numeric-looking, so it orders as a plain string.
        assert!(compare(ComparisonOp::Lt, &s("NaN"), &s("zzz")).unwrap());
    }
}
