//! Builder for record shapes.
//!
//! Shapes are assembled with a fluent API and checked once, when built.

use crate::{Constraint, FieldSpec, RecordShape, Result, SchemaError};
use std::collections::HashSet;

/// Builder for creating a [`RecordShape`].
///
/// # Example
///
/// ```rust
/// use jobs_core::{Constraint, NumberBounds, RecordShapeBuilder};
///
/// let common = RecordShapeBuilder::new("CommonJob")
///     .optional("name", Constraint::AnyString)
///     .optional(
///         "n_iterations",
///         Constraint::BoundedNumber(NumberBounds::non_negative_integer()),
///     )
///     .try_build()
///     .unwrap();
///
/// let wifi = RecordShapeBuilder::extending("WifiJob", &common)
///     .required("wifi_api", Constraint::AnyString)
///     .try_build()
///     .unwrap();
///
/// assert_eq!(wifi.fields.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct RecordShapeBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    discriminators: Vec<String>,
}

impl RecordShapeBuilder {
    /// Creates a builder for an empty shape.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a builder starting from the fields of `base`.
    ///
    /// Discriminators are not inherited: they identify a shape, not its
    /// ancestors.
    pub fn extending(name: impl Into<String>, base: &RecordShape) -> Self {
        Self {
            name: name.into(),
            fields: base.fields.clone(),
            ..Default::default()
        }
    }

    /// Sets the shape description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a required field.
    pub fn required(self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.field(FieldSpec::required(name, constraint))
    }

    /// Adds an optional field.
    pub fn optional(self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.field(FieldSpec::optional(name, constraint))
    }

    /// Marks a declared field as identifying this shape.
    pub fn discriminator(mut self, name: impl Into<String>) -> Self {
        self.discriminators.push(name.into());
        self
    }

    /// Marks several declared fields as identifying this shape.
    pub fn discriminators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discriminators.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds the shape.
    ///
    /// # Errors
    ///
    /// Fails on duplicate field names, discriminators naming undeclared
    /// fields, unsatisfiable numeric bounds, and empty candidate lists.
    pub fn try_build(self) -> Result<RecordShape> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::duplicate_field(&self.name, &field.name));
            }
            check_constraint(&field.name, &field.constraint)?;
        }

        if let Some(unknown) = self
            .discriminators
            .iter()
            .find(|d| !seen.contains(d.as_str()))
        {
            return Err(SchemaError::UnknownDiscriminator {
                shape: self.name.clone(),
                field: unknown.clone(),
            });
        }

        Ok(RecordShape {
            name: self.name,
            description: self.description,
            fields: self.fields,
            discriminators: self.discriminators,
        })
    }
}

/// Checks the parts of a constraint a builder cannot enforce by type.
///
/// Nested shapes went through their own builder and are not re-checked.
fn check_constraint(field: &str, constraint: &Constraint) -> Result<()> {
    match constraint {
        Constraint::BoundedNumber(bounds) => bounds.check(field),
        Constraint::Sequence(inner) => check_constraint(field, inner),
        Constraint::OneOf(candidates) if candidates.is_empty() => {
            Err(SchemaError::EmptyCandidates {
                field: field.to_string(),
            })
        }
        _ => Ok(()),
    }
}
