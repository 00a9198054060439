//! Validation options and reports.
//!
//! The strict entry point of the validator answers yes or no. Tools that
//! want a fuller picture (every failing job, ambiguity warnings, per-kind
//! counts) ask for a [`ValidationReport`] under a [`ValidationContext`].

use serde::Serialize;
use std::collections::BTreeMap;

/// Options for report-producing validation.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    /// Warn about job records accepted by more than one job kind
    pub warn_ambiguous: bool,

    /// Report every failing job instead of stopping at the first one
    pub collect_all: bool,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables ambiguity warnings.
    pub fn with_warn_ambiguous(mut self, warn_ambiguous: bool) -> Self {
        self.warn_ambiguous = warn_ambiguous;
        self
    }

    /// Enables collection of every failing job.
    pub fn with_collect_all(mut self, collect_all: bool) -> Self {
        self.collect_all = collect_all;
        self
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether the document is valid
    pub passed: bool,

    /// Diagnostics, each prefixed with the offending field path
    pub errors: Vec<String>,

    /// Non-fatal findings
    pub warnings: Vec<String>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about one validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of job records examined
    pub jobs_validated: usize,

    /// Accepted job records per job kind
    pub job_kinds: BTreeMap<String, usize>,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.passed = false;
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Counts one accepted job of the given kind.
    pub fn record_job_kind(&mut self, kind: impl Into<String>) {
        *self.stats.job_kinds.entry(kind.into()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_fails_report() {
        let mut report = ValidationReport::success();
        report.add_error("$.jobs[0]: broken");
        assert!(!report.passed);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut report = ValidationReport::success();
        report.add_warning("ambiguous");
        assert!(report.passed);
    }

    #[test]
    fn test_job_kind_counts() {
        let mut report = ValidationReport::success();
        report.record_job_kind("wifi");
        report.record_job_kind("wifi");
        report.record_job_kind("gnss_assisted");
        assert_eq!(report.stats.job_kinds["wifi"], 2);
        assert_eq!(report.stats.job_kinds["gnss_assisted"], 1);
    }

    #[test]
    fn test_context_builders() {
        let context = ValidationContext::new()
            .with_warn_ambiguous(true)
            .with_collect_all(true);
        assert!(context.warn_ambiguous);
        assert!(context.collect_all);
    }
}
