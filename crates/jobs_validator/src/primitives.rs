//! Scalar constraint checks.
//!
//! This module handles the leaf constraints of a schema:
//! - Strings, optionally required to fully match a pattern
//! - Numbers within optional bounds and an optional step
//! - Booleans
//!
//! It also unwraps arrays and objects for the engine, raising a type
//! mismatch for anything else.

use crate::trail::Trail;
use crate::{RangeViolation, SchemaValidationError};
use jobs_core::{NumberBounds, Pattern, ValueKind};
use serde_json::{Map, Value};

type Result<T> = std::result::Result<T, SchemaValidationError>;

/// Validates a string, and its pattern when one is given.
pub(crate) fn check_string(value: &Value, pattern: Option<&Pattern>, trail: &Trail<'_>) -> Result<()> {
    let text = value
        .as_str()
        .ok_or_else(|| type_mismatch(ValueKind::String, value, trail))?;

    match pattern {
        Some(pattern) if !pattern.is_match(text) => Err(SchemaValidationError::pattern_mismatch(
            trail.to_path(),
            text,
            pattern.anchored(),
        )),
        _ => Ok(()),
    }
}

/// Validates a number against its bounds.
pub(crate) fn check_number(value: &Value, bounds: &NumberBounds, trail: &Trail<'_>) -> Result<()> {
    let number = value
        .as_f64()
        .ok_or_else(|| type_mismatch(ValueKind::Number, value, trail))?;

    match range_violation(number, bounds) {
        Some(violation) => Err(SchemaValidationError::range_mismatch(
            trail.to_path(),
            number,
            violation,
        )),
        None => Ok(()),
    }
}

/// Validates a boolean.
pub(crate) fn check_boolean(value: &Value, trail: &Trail<'_>) -> Result<()> {
    match value {
        Value::Bool(_) => Ok(()),
        other => Err(type_mismatch(ValueKind::Boolean, other, trail)),
    }
}

/// Returns the elements of an array.
pub(crate) fn expect_array<'v>(value: &'v Value, trail: &Trail<'_>) -> Result<&'v [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| type_mismatch(ValueKind::Array, value, trail))
}

/// Returns the entries of an object.
pub(crate) fn expect_object<'v>(
    value: &'v Value,
    trail: &Trail<'_>,
) -> Result<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| type_mismatch(ValueKind::Object, value, trail))
}

/// First bound `number` breaks, checked minimum, maximum, then step.
fn range_violation(number: f64, bounds: &NumberBounds) -> Option<RangeViolation> {
    if let Some(min) = bounds.minimum {
        if number < min {
            return Some(RangeViolation::BelowMinimum(min));
        }
    }
    if let Some(max) = bounds.maximum {
        if number > max {
            return Some(RangeViolation::AboveMaximum(max));
        }
    }
    if let Some(step) = bounds.multiple_of {
        if number % step != 0.0 {
            return Some(RangeViolation::NotMultipleOf(step));
        }
    }
    None
}

fn type_mismatch(expected: ValueKind, value: &Value, trail: &Trail<'_>) -> SchemaValidationError {
    SchemaValidationError::type_mismatch(trail.to_path(), expected, ValueKind::of(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: Trail<'static> = Trail::Root;

    fn steps() -> NumberBounds {
        NumberBounds::non_negative_integer()
    }

    #[test]
    fn test_string_without_pattern() {
        assert!(check_string(&json!("anything"), None, &ROOT).is_ok());
        assert!(matches!(
            check_string(&json!(12), None, &ROOT),
            Err(SchemaValidationError::TypeMismatch {
                expected: ValueKind::String,
                actual: ValueKind::Number,
                ..
            })
        ));
    }

    #[test]
    fn test_pattern_valid() {
        let pattern = Pattern::one_of(["beacon_and_packet", "beacon_only"]).unwrap();
        assert!(check_string(&json!("beacon_only"), Some(&pattern), &ROOT).is_ok());
    }

    #[test]
    fn test_pattern_invalid() {
        let pattern = Pattern::one_of(["beacon_and_packet", "beacon_only"]).unwrap();
        let error = check_string(&json!("invalid_mode"), Some(&pattern), &ROOT).unwrap_err();
        assert_eq!(
            error,
            SchemaValidationError::pattern_mismatch(
                crate::FieldPath::root(),
                "invalid_mode",
                "^(?:beacon_and_packet|beacon_only)$"
            )
        );
    }

    #[test]
    fn test_pattern_rejects_partial_match() {
        let pattern = Pattern::one_of(["gps"]).unwrap();
        assert!(check_string(&json!("gps_l1"), Some(&pattern), &ROOT).is_err());
    }

    #[test]
    fn test_non_negative_integers() {
        for accepted in [json!(0), json!(1), json!(2), json!(4096), json!(3.0)] {
            assert!(check_number(&accepted, &steps(), &ROOT).is_ok(), "{accepted}");
        }
    }

    #[test]
    fn test_negative_rejected() {
        let error = check_number(&json!(-1), &steps(), &ROOT).unwrap_err();
        assert!(matches!(
            error,
            SchemaValidationError::RangeMismatch {
                violation: RangeViolation::BelowMinimum(_),
                ..
            }
        ));
    }

    #[test]
    fn test_fraction_rejected() {
        let error = check_number(&json!(1.5), &steps(), &ROOT).unwrap_err();
        assert!(matches!(
            error,
            SchemaValidationError::RangeMismatch {
                violation: RangeViolation::NotMultipleOf(_),
                ..
            }
        ));
    }

    #[test]
    fn test_maximum() {
        let bounds = NumberBounds::integer_in(0.0, 255.0);
        assert!(check_number(&json!(255), &bounds, &ROOT).is_ok());
        let error = check_number(&json!(300), &bounds, &ROOT).unwrap_err();
        assert!(matches!(
            error,
            SchemaValidationError::RangeMismatch {
                violation: RangeViolation::AboveMaximum(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unbounded_number() {
        assert!(check_number(&json!(-45.123), &NumberBounds::any(), &ROOT).is_ok());
        assert!(check_number(&json!("45"), &NumberBounds::any(), &ROOT).is_err());
    }

    #[test]
    fn test_boolean() {
        assert!(check_boolean(&json!(true), &ROOT).is_ok());
        assert!(check_boolean(&json!(false), &ROOT).is_ok());
        assert!(check_boolean(&json!("true"), &ROOT).is_err());
        assert!(check_boolean(&json!(1), &ROOT).is_err());
        assert!(check_boolean(&json!(null), &ROOT).is_err());
    }

    #[test]
    fn test_containers() {
        assert_eq!(expect_array(&json!([1, 2]), &ROOT).unwrap().len(), 2);
        assert!(expect_array(&json!({}), &ROOT).is_err());
        assert!(expect_object(&json!({"a": 1}), &ROOT).is_ok());
        assert!(expect_object(&json!([]), &ROOT).is_err());
    }
}
