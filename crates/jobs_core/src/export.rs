//! JSON Schema export.
//!
//! Renders a constraint tree as a draft-07 JSON Schema for editors and
//! documentation tooling. The rendering accepts exactly what the validation
//! engine accepts:
//!
//! - records allow additional properties;
//! - discriminators become an `anyOf` of single-field `required` clauses;
//! - candidate lists become `anyOf`, since the engine takes the first shape
//!   that accepts and never rejects a record for matching two.

use crate::{Constraint, NumberBounds, RecordShape};
use serde_json::{Map, Value, json};

/// Draft identifier written into the root of exported schemas.
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Renders `root` as a standalone JSON Schema document.
pub fn to_json_schema(root: &Constraint) -> Value {
    let mut schema = constraint_schema(root);
    if let Value::Object(map) = &mut schema {
        map.insert("$schema".to_string(), json!(JSON_SCHEMA_DRAFT));
    }
    schema
}

fn constraint_schema(constraint: &Constraint) -> Value {
    match constraint {
        Constraint::AnyString => json!({ "type": "string" }),
        Constraint::PatternString(pattern) => json!({
            "type": "string",
            "pattern": pattern.anchored(),
        }),
        Constraint::BoundedNumber(bounds) => number_schema(bounds),
        Constraint::Boolean => json!({ "type": "boolean" }),
        Constraint::Sequence(inner) => json!({
            "type": "array",
            "items": constraint_schema(inner),
        }),
        Constraint::Record(shape) => record_schema(shape),
        Constraint::OneOf(candidates) => json!({
            "anyOf": candidates.iter().map(record_schema).collect::<Vec<_>>(),
        }),
    }
}

fn number_schema(bounds: &NumberBounds) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!("number"));
    if let Some(minimum) = bounds.minimum {
        map.insert("minimum".to_string(), number(minimum));
    }
    if let Some(maximum) = bounds.maximum {
        map.insert("maximum".to_string(), number(maximum));
    }
    if let Some(step) = bounds.multiple_of {
        map.insert("multipleOf".to_string(), number(step));
    }
    Value::Object(map)
}

fn record_schema(shape: &RecordShape) -> Value {
    let mut properties = Map::new();
    for field in &shape.fields {
        let mut schema = constraint_schema(&field.constraint);
        if let (Some(description), Value::Object(map)) = (&field.description, &mut schema) {
            map.insert("description".to_string(), json!(description));
        }
        properties.insert(field.name.clone(), schema);
    }

    let mut map = Map::new();
    map.insert("title".to_string(), json!(shape.name));
    if let Some(description) = &shape.description {
        map.insert("description".to_string(), json!(description));
    }
    map.insert("type".to_string(), json!("object"));
    map.insert("properties".to_string(), Value::Object(properties));
    map.insert("additionalProperties".to_string(), json!(true));

    let required: Vec<&str> = shape.required_fields().collect();
    if !required.is_empty() {
        map.insert("required".to_string(), json!(required));
    }
    if !shape.discriminators.is_empty() {
        let clauses: Vec<Value> = shape
            .discriminators
            .iter()
            .map(|name| json!({ "required": [name] }))
            .collect();
        map.insert("anyOf".to_string(), Value::Array(clauses));
    }
    Value::Object(map)
}

/// Writes whole numbers as JSON integers so `0` does not export as `0.0`.
fn number(value: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        json!(value as i64)
    } else {
        json!(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pattern, RecordShapeBuilder};
    use pretty_assertions::assert_eq;

    fn sample_shape() -> RecordShape {
        RecordShapeBuilder::new("Sample")
            .required(
                "mode",
                Constraint::PatternString(Pattern::one_of(["single", "dual"]).unwrap()),
            )
            .optional(
                "count",
                Constraint::BoundedNumber(NumberBounds::integer_in(0.0, 255.0)),
            )
            .optional("flags", Constraint::sequence(Constraint::Boolean))
            .discriminator("mode")
            .try_build()
            .unwrap()
    }

    #[test]
    fn test_record_export() {
        let schema = to_json_schema(&Constraint::Record(sample_shape()));

        assert_eq!(
            schema,
            json!({
                "$schema": JSON_SCHEMA_DRAFT,
                "title": "Sample",
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "pattern": "^(?:single|dual)$" },
                    "count": { "type": "number", "minimum": 0, "maximum": 255, "multipleOf": 1 },
                    "flags": { "type": "array", "items": { "type": "boolean" } }
                },
                "additionalProperties": true,
                "required": ["mode"],
                "anyOf": [{ "required": ["mode"] }]
            })
        );
    }

    #[test]
    fn test_fractional_bounds_stay_fractional() {
        let schema = to_json_schema(&Constraint::BoundedNumber(
            NumberBounds::any().with_minimum(-90.5),
        ));
        assert_eq!(schema["minimum"], json!(-90.5));
    }

    #[test]
    fn test_candidates_export_as_any_of() {
        let schema = to_json_schema(&Constraint::OneOf(vec![sample_shape(), sample_shape()]));
        assert_eq!(schema["anyOf"].as_array().map(Vec::len), Some(2));
        assert_eq!(schema["$schema"], json!(JSON_SCHEMA_DRAFT));
    }

    #[test]
    fn test_exported_schema_is_usable_by_jsonschema() {
        let schema = to_json_schema(&Constraint::Record(sample_shape()));
        let validator = jsonschema::validator_for(&schema).expect("exported schema compiles");

        assert!(validator.is_valid(&json!({ "mode": "dual", "count": 3, "other": "kept" })));
        assert!(!validator.is_valid(&json!({ "mode": "triple" })));
        assert!(!validator.is_valid(&json!({ "mode": "single", "count": 1.5 })));
        assert!(!validator.is_valid(&json!({ "count": 3 })));
    }
}
