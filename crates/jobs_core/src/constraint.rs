//! Constraint model for job documents.
//!
//! A schema is plain data: a tree of [`Constraint`] values that the validation
//! engine interprets. Nothing in this module looks at a document.

use crate::{Result, SchemaError};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Basic kind of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Name used in diagnostics and in exported schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regular expression that must match a whole string.
///
/// The source is kept as written; the compiled form is anchored on both
/// ends, so `wifi_scan` never accepts `wifi_scan_extended`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$"))
            .map_err(|e| SchemaError::invalid_pattern(&source, e.to_string()))?;
        Ok(Self { source, regex })
    }

    /// Builds an alternation accepting exactly the given literals.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobs_core::Pattern;
    ///
    /// let modes = Pattern::one_of(["single", "dual"]).unwrap();
    /// assert!(modes.is_match("dual"));
    /// assert!(!modes.is_match("dual_band"));
    /// ```
    pub fn one_of<I, S>(choices: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternation = choices
            .into_iter()
            .map(|choice| regex::escape(choice.as_ref()))
            .collect::<Vec<_>>();
        if alternation.is_empty() {
            return Err(SchemaError::EmptyEnumeration);
        }
        Self::new(alternation.join("|"))
    }

    /// The pattern as written by the schema author.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchored form, as matched and as exported.
    pub fn anchored(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the whole of `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Bounds on a numeric value.
///
/// Omitted bounds are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberBounds {
    /// Inclusive lower bound
    pub minimum: Option<f64>,
    /// Inclusive upper bound
    pub maximum: Option<f64>,
    /// Step every accepted value must be a multiple of
    pub multiple_of: Option<f64>,
}

impl NumberBounds {
    /// Any number at all.
    pub fn any() -> Self {
        Self::default()
    }

    /// Integers from zero upwards (counters, timeouts, retries).
    pub fn non_negative_integer() -> Self {
        Self::any().with_minimum(0.0).with_multiple_of(1.0)
    }

    /// Integers in `[minimum, maximum]`.
    pub fn integer_in(minimum: f64, maximum: f64) -> Self {
        Self::non_negative_integer()
            .with_minimum(minimum)
            .with_maximum(maximum)
    }

    /// Sets the lower bound.
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the upper bound.
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the step.
    pub fn with_multiple_of(mut self, step: f64) -> Self {
        self.multiple_of = Some(step);
        self
    }

    /// Rejects bounds that no value could satisfy.
    pub fn check(&self, field: &str) -> Result<()> {
        for bound in [self.minimum, self.maximum].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(SchemaError::invalid_bounds(field, "bounds must be finite"));
            }
        }
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(SchemaError::invalid_bounds(
                    field,
                    format!("minimum {min} is greater than maximum {max}"),
                ));
            }
        }
        if let Some(step) = self.multiple_of {
            if !step.is_finite() || step <= 0.0 {
                return Err(SchemaError::invalid_bounds(
                    field,
                    format!("step {step} must be a positive number"),
                ));
            }
        }
        Ok(())
    }
}

/// A single field of a [`RecordShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key of the field in the record
    pub name: String,

    /// Constraint the value must satisfy
    pub constraint: Constraint,

    /// Whether the field must be present
    pub required: bool,

    /// Optional human-readable description, carried into exported schemas
    pub description: Option<String>,
}

impl FieldSpec {
    /// A field that must be present.
    pub fn required(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            required: true,
            description: None,
        }
    }

    /// A field that may be absent.
    pub fn optional(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            required: false,
            ..Self::required(name, constraint)
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Expected structure of an object.
///
/// Fields not declared here are ignored by validation. When `discriminators`
/// is not empty, a record only belongs to this shape if it carries at least
/// one of those fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    /// Shape name, used in diagnostics (`WifiJob`, `AssistedCoordinate`, ...)
    pub name: String,

    /// Optional human-readable description
    pub description: Option<String>,

    /// Declared fields, in validation order
    pub fields: Vec<FieldSpec>,

    /// Fields whose presence identifies a record as this shape
    pub discriminators: Vec<String>,
}

impl RecordShape {
    /// Looks up a declared field.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates over the names of required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

/// Constraint on a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Any string
    AnyString,

    /// A string fully matching a pattern
    PatternString(Pattern),

    /// A number within bounds
    BoundedNumber(NumberBounds),

    /// `true` or `false`
    Boolean,

    /// An array whose every element satisfies the inner constraint
    Sequence(Box<Constraint>),

    /// A nested object
    Record(RecordShape),

    /// An object matching one of several shapes, tried in order; the first
    /// shape that accepts wins
    OneOf(Vec<RecordShape>),
}

impl Constraint {
    /// Wraps an element constraint into a sequence.
    pub fn sequence(inner: Constraint) -> Self {
        Constraint::Sequence(Box::new(inner))
    }
}
