//! Error types for validation operations.

use jobs_core::ValueKind;
use jobs_parser::ParserError;
use std::fmt;
use thiserror::Error;

/// One step into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key
    Field(String),
    /// Array position
    Index(usize),
}

/// Location of a value inside a document, rendered as `$.jobs[0].wifi_mode`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root (`$`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from its segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns the path one field deeper.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(name.into()));
        self
    }

    /// Returns the path one array position deeper.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// The steps from the root.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Why a number fell outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeViolation {
    /// Smaller than the inclusive minimum
    BelowMinimum(f64),
    /// Larger than the inclusive maximum
    AboveMaximum(f64),
    /// Not a whole multiple of the step
    NotMultipleOf(f64),
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeViolation::BelowMinimum(min) => write!(f, "is below minimum {min}"),
            RangeViolation::AboveMaximum(max) => write!(f, "is above maximum {max}"),
            RangeViolation::NotMultipleOf(step) => write!(f, "is not a multiple of {step}"),
        }
    }
}

/// Why one candidate shape rejected a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    /// Candidate shape name
    pub name: String,
    /// The candidate's own failure
    pub error: SchemaValidationError,
}

impl CandidateFailure {
    /// Creates a new candidate failure.
    pub fn new(name: impl Into<String>, error: SchemaValidationError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

/// A document does not conform to its schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaValidationError {
    /// Value of the wrong basic kind
    #[error("{path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// String outside the accepted pattern
    #[error("{path}: value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        path: FieldPath,
        value: String,
        pattern: String,
    },

    /// Number outside its bounds or off its step
    #[error("{path}: value {value} {violation}")]
    RangeMismatch {
        path: FieldPath,
        value: f64,
        violation: RangeViolation,
    },

    /// Mandatory field absent from a record
    #[error("{path}: required field '{field}' is missing")]
    RequiredFieldMissing { path: FieldPath, field: String },

    /// Record carries none of the fields identifying a shape
    #[error("{path}: record has none of the fields identifying {shape} ({})", .fields.join(", "))]
    DiscriminatorMissing {
        path: FieldPath,
        shape: String,
        fields: Vec<String>,
    },

    /// Record accepted by none of the candidate shapes
    #[error("{path}: record matches none of the job kinds [{}]", render_candidates(.candidates))]
    NoCandidateMatched {
        path: FieldPath,
        candidates: Vec<CandidateFailure>,
    },
}

impl SchemaValidationError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(path: FieldPath, expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch {
            path,
            expected,
            actual,
        }
    }

    /// Creates a new pattern mismatch error.
    pub fn pattern_mismatch(
        path: FieldPath,
        value: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::PatternMismatch {
            path,
            value: value.into(),
            pattern: pattern.into(),
        }
    }

    /// Creates a new range mismatch error.
    pub fn range_mismatch(path: FieldPath, value: f64, violation: RangeViolation) -> Self {
        Self::RangeMismatch {
            path,
            value,
            violation,
        }
    }

    /// Creates a new missing field error.
    pub fn required_field_missing(path: FieldPath, field: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            path,
            field: field.into(),
        }
    }

    /// Location of the offending value.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::PatternMismatch { path, .. }
            | Self::RangeMismatch { path, .. }
            | Self::RequiredFieldMissing { path, .. }
            | Self::DiscriminatorMissing { path, .. }
            | Self::NoCandidateMatched { path, .. } => path,
        }
    }

    /// Returns true if the error says the record at `record` is not of the
    /// shape at all, rather than a bad value inside a recognised record.
    pub(crate) fn is_identification_failure(&self, record: &FieldPath) -> bool {
        matches!(
            self,
            Self::RequiredFieldMissing { path, .. } | Self::DiscriminatorMissing { path, .. }
                if path == record
        )
    }
}

fn render_candidates(candidates: &[CandidateFailure]) -> String {
    candidates
        .iter()
        .map(|c| format!("{}: {}", c.name, c.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to validate a job file.
#[derive(Debug, Error)]
pub enum JobFileError {
    /// The file could not be read or decoded
    #[error(transparent)]
    Parse(#[from] ParserError),

    /// The decoded document is invalid
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_display() {
        assert_eq!(FieldPath::root().to_string(), "$");
        let path = FieldPath::root().field("jobs").index(2).field("wifi_types").index(0);
        assert_eq!(path.to_string(), "$.jobs[2].wifi_types[0]");
    }

    #[test]
    fn test_range_mismatch_message() {
        let error = SchemaValidationError::range_mismatch(
            FieldPath::root().field("jobs").index(0).field("gnss_autonomous_nb_satellite"),
            300.0,
            RangeViolation::AboveMaximum(255.0),
        );
        assert_eq!(
            error.to_string(),
            "$.jobs[0].gnss_autonomous_nb_satellite: value 300 is above maximum 255"
        );
    }

    #[test]
    fn test_no_candidate_message_lists_every_candidate() {
        let record = FieldPath::root().field("jobs").index(0);
        let error = SchemaValidationError::NoCandidateMatched {
            path: record.clone(),
            candidates: vec![
                CandidateFailure::new(
                    "WifiJob",
                    SchemaValidationError::required_field_missing(record.clone(), "wifi_api"),
                ),
                CandidateFailure::new(
                    "GnssAutonomousJob",
                    SchemaValidationError::DiscriminatorMissing {
                        path: record.clone(),
                        shape: "GnssAutonomousJob".to_string(),
                        fields: vec!["gnss_autonomous_option".to_string()],
                    },
                ),
            ],
        };
        let message = error.to_string();
        assert!(message.starts_with("$.jobs[0]: record matches none of the job kinds"));
        assert!(message.contains("WifiJob: $.jobs[0]: required field 'wifi_api' is missing"));
        assert!(message.contains("GnssAutonomousJob: $.jobs[0]: record has none of the fields"));
    }

    #[test]
    fn test_identification_failure_only_at_record_level() {
        let record = FieldPath::root().field("jobs").index(0);
        let missing = SchemaValidationError::required_field_missing(record.clone(), "wifi_api");
        assert!(missing.is_identification_failure(&record));

        let nested = SchemaValidationError::required_field_missing(
            record.clone().field("assisted_coordinate"),
            "latitude",
        );
        assert!(!nested.is_identification_failure(&record));

        let range = SchemaValidationError::range_mismatch(
            record.clone().field("n_iterations"),
            -1.0,
            RangeViolation::BelowMinimum(0.0),
        );
        assert!(!range.is_identification_failure(&record));
    }
}
