//! Error types for schema construction.
//!
//! These errors are raised while a schema is being *defined*, never while a
//! document is being validated. Document failures live in `jobs_validator`.

use thiserror::Error;

/// Result type for schema construction.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while building a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A pattern failed to compile
    #[error("Invalid pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Pattern source as written by the schema author
        pattern: String,
        /// Compiler message
        error: String,
    },

    /// An enumeration was built from an empty list of choices
    #[error("Enumeration pattern needs at least one choice")]
    EmptyEnumeration,

    /// Numeric bounds that no value can satisfy
    #[error("Invalid bounds for field '{field}': {message}")]
    InvalidBounds {
        /// Field carrying the bounds
        field: String,
        /// What is wrong with them
        message: String,
    },

    /// The same field name declared twice in one shape
    #[error("Duplicate field '{field}' in shape '{shape}'")]
    DuplicateField {
        /// Shape name
        shape: String,
        /// Field name
        field: String,
    },

    /// A discriminator that names no declared field
    #[error("Discriminator '{field}' is not a field of shape '{shape}'")]
    UnknownDiscriminator {
        /// Shape name
        shape: String,
        /// Discriminator name
        field: String,
    },

    /// A candidate list with nothing to choose from
    #[error("Field '{field}' declares an empty candidate list")]
    EmptyCandidates {
        /// Field carrying the candidate list
        field: String,
    },
}

impl SchemaError {
    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, error: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            error: error.into(),
        }
    }

    /// Creates a new invalid bounds error.
    pub fn invalid_bounds(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBounds {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new duplicate field error.
    pub fn duplicate_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            shape: shape.into(),
            field: field.into(),
        }
    }
}
