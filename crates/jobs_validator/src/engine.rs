//! Main validation engine.
//!
//! One recursive interpreter walks a document against a constraint tree,
//! delegating leaf checks to the primitives. [`JobValidator`] wraps it for
//! job documents and adds file loading, classification and reports.

use crate::primitives::{check_boolean, check_number, check_string, expect_array, expect_object};
use crate::trail::Trail;
use crate::{
    CandidateFailure, FieldPath, JOBS_FIELD, JobFileError, JobKind, JobsSchema, PathSegment,
    SchemaValidationError,
};
use jobs_core::{Constraint, RecordShape, ValidationContext, ValidationReport};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, trace};

type Result<T> = std::result::Result<T, SchemaValidationError>;

/// Validates `document` against `schema`.
///
/// Fails on the first offending value, except when a record matches none of
/// the candidates of a [`Constraint::OneOf`]: that failure carries the reason
/// every candidate gave.
///
/// # Example
///
/// ```rust
/// use jobs_core::{Constraint, NumberBounds};
/// use jobs_validator::{SchemaValidationError, validate};
/// use serde_json::json;
///
/// let counter = Constraint::BoundedNumber(NumberBounds::non_negative_integer());
///
/// assert!(validate(&counter, &json!(3)).is_ok());
/// assert!(matches!(
///     validate(&counter, &json!(1.5)),
///     Err(SchemaValidationError::RangeMismatch { .. })
/// ));
/// ```
pub fn validate(schema: &Constraint, document: &Value) -> Result<()> {
    check(schema, document, &Trail::Root)
}

fn check(constraint: &Constraint, value: &Value, trail: &Trail<'_>) -> Result<()> {
    match constraint {
        Constraint::AnyString => check_string(value, None, trail),
        Constraint::PatternString(pattern) => check_string(value, Some(pattern), trail),
        Constraint::BoundedNumber(bounds) => check_number(value, bounds, trail),
        Constraint::Boolean => check_boolean(value, trail),
        Constraint::Sequence(inner) => {
            for (index, item) in expect_array(value, trail)?.iter().enumerate() {
                check(inner, item, &trail.index(index))?;
            }
            Ok(())
        }
        Constraint::Record(shape) => check_record(shape, value, trail),
        Constraint::OneOf(candidates) => resolve(candidates, value, trail).map(|_| ()),
    }
}

/// Checks identity first (required fields, discriminators), then values in
/// declaration order. Undeclared fields are ignored.
fn check_record(shape: &RecordShape, value: &Value, trail: &Trail<'_>) -> Result<()> {
    let fields = expect_object(value, trail)?;

    if let Some(missing) = shape
        .required_fields()
        .find(|name| !fields.contains_key(*name))
    {
        return Err(SchemaValidationError::required_field_missing(
            trail.to_path(),
            missing,
        ));
    }

    if !shape.discriminators.is_empty()
        && !shape
            .discriminators
            .iter()
            .any(|name| fields.contains_key(name))
    {
        return Err(SchemaValidationError::DiscriminatorMissing {
            path: trail.to_path(),
            shape: shape.name.clone(),
            fields: shape.discriminators.clone(),
        });
    }

    for spec in &shape.fields {
        if let Some(field_value) = fields.get(&spec.name) {
            check(&spec.constraint, field_value, &trail.field(&spec.name))?;
        }
    }

    Ok(())
}

/// Returns the position of the first candidate accepting `value`.
///
/// When none accepts and exactly one of them recognised the record as its
/// own, that candidate's error is returned as is; otherwise every
/// candidate's error is returned together.
fn resolve(candidates: &[RecordShape], value: &Value, trail: &Trail<'_>) -> Result<usize> {
    let mut failures = Vec::with_capacity(candidates.len());

    for (position, candidate) in candidates.iter().enumerate() {
        match check_record(candidate, value, trail) {
            Ok(()) => {
                trace!(path = %trail.to_path(), candidate = %candidate.name, "candidate accepted");
                return Ok(position);
            }
            Err(error) => {
                debug!(path = %trail.to_path(), candidate = %candidate.name, %error, "candidate rejected");
                failures.push(CandidateFailure::new(&candidate.name, error));
            }
        }
    }

    let record = trail.to_path();
    let recognised: Vec<usize> = failures
        .iter()
        .enumerate()
        .filter(|(_, failure)| !failure.error.is_identification_failure(&record))
        .map(|(position, _)| position)
        .collect();

    if let &[only] = recognised.as_slice() {
        return Err(failures.swap_remove(only).error);
    }

    Err(SchemaValidationError::NoCandidateMatched {
        path: record,
        candidates: failures,
    })
}

/// Positions of every candidate accepting `value`.
fn accepting(candidates: &[RecordShape], value: &Value, trail: &Trail<'_>) -> Vec<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| check_record(candidate, value, trail).is_ok())
        .map(|(position, _)| position)
        .collect()
}

/// Candidates that recognise `value` as their own but reject one of its
/// values, with the error each gave.
fn overridden<'c>(
    candidates: &'c [RecordShape],
    value: &Value,
    trail: &Trail<'_>,
) -> Vec<(&'c str, SchemaValidationError)> {
    let record = trail.to_path();
    candidates
        .iter()
        .filter_map(|candidate| match check_record(candidate, value, trail) {
            Err(error) if !error.is_identification_failure(&record) => {
                Some((candidate.name.as_str(), error))
            }
            _ => None,
        })
        .collect()
}

/// Returns true for paths at or below `$.jobs[i]`.
fn is_inside_job(path: &FieldPath) -> bool {
    matches!(
        path.segments(),
        [PathSegment::Field(name), PathSegment::Index(_), ..] if name == JOBS_FIELD
    )
}

/// Validation engine for job documents.
///
/// # Example
///
/// ```rust
/// use jobs_validator::{JobKind, JobValidator};
/// use serde_json::json;
///
/// let validator = JobValidator::new();
///
/// let document = json!({"jobs": [{"wifi_api": "wifi_scan", "wifi_channels": ["CHANNEL_1"]}]});
/// assert!(validator.validate(&document).is_ok());
///
/// let kind = validator.classify(&json!({"gnss_assisted_capture_mode": "dual"})).unwrap();
/// assert_eq!(kind, JobKind::GnssAssisted);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JobValidator<'s> {
    schema: &'s JobsSchema,
}

impl JobValidator<'static> {
    /// Creates a validator using the built-in schema.
    pub fn new() -> Self {
        Self::with_schema(JobsSchema::default_schema())
    }
}

impl Default for JobValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> JobValidator<'s> {
    /// Creates a validator using a custom schema (e.g. another channel table).
    pub fn with_schema(schema: &'s JobsSchema) -> Self {
        Self { schema }
    }

    /// Validates a decoded document, stopping at the first failure.
    pub fn validate(&self, document: &Value) -> Result<()> {
        validate(self.schema.document(), document)
    }

    /// Loads a document from disk and validates it.
    pub fn validate_file(&self, path: &Path) -> std::result::Result<(), JobFileError> {
        debug!(path = %path.display(), "loading job document");
        let document = jobs_parser::parse_file(path)?;
        self.validate(&document)?;
        Ok(())
    }

    /// Resolves which kind a single job record is.
    pub fn classify(&self, record: &Value) -> Result<JobKind> {
        resolve(self.schema.kinds(), record, &Trail::Root).map(|position| JobKind::ALL[position])
    }

    /// Validates a document and reports every finding allowed by `context`.
    ///
    /// Without `collect_all` the report holds at most one error, the one
    /// [`validate`](Self::validate) returns. With it, each job is checked on
    /// its own and every failing job is listed. Failures outside the job
    /// list always stop validation.
    pub fn validate_with_context(
        &self,
        document: &Value,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::success();

        match self.validate(document) {
            Ok(()) => {}
            Err(error) if context.collect_all && is_inside_job(error.path()) => {}
            Err(error) => {
                report.add_error(error.to_string());
                return finish(report, start);
            }
        }

        let root = Trail::Root;
        let jobs_trail = root.field(JOBS_FIELD);
        let kinds = self.schema.kinds();

        for (index, job) in jobs_of(document).iter().enumerate() {
            let trail = jobs_trail.index(index);
            report.stats.jobs_validated += 1;

            let position = match resolve(kinds, job, &trail) {
                Ok(position) => position,
                Err(error) => {
                    report.add_error(error.to_string());
                    continue;
                }
            };
            let kind = JobKind::ALL[position];
            report.record_job_kind(kind.as_str());

            if context.warn_ambiguous {
                let matches = accepting(kinds, job, &trail);
                if matches.len() > 1 {
                    let names: Vec<&str> = matches.iter().map(|&p| kinds[p].name.as_str()).collect();
                    report.add_warning(format!(
                        "{}: record matches several job kinds ({}); treated as {}",
                        trail.to_path(),
                        names.join(", "),
                        kind.shape_name()
                    ));
                }

                for (name, error) in overridden(kinds, job, &trail) {
                    report.add_warning(format!(
                        "{}: settings for {} are ignored since the record is treated as {} ({})",
                        trail.to_path(),
                        name,
                        kind.shape_name(),
                        error
                    ));
                }
            }
        }

        finish(report, start)
    }
}

fn jobs_of(document: &Value) -> &[Value] {
    document
        .get(JOBS_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn finish(mut report: ValidationReport, start: Instant) -> ValidationReport {
    report.stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        passed = report.passed,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        jobs = report.stats.jobs_validated,
        "job document validated"
    );
    report
}
