use anyhow::{Context, Result};
use jobs_core::ValidationContext;
use jobs_parser::parse_file;
use jobs_validator::JobValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(file: &str, format: &str, collect_all: bool, warn_ambiguous: bool) -> Result<()> {
    info!("Validating job document: {}", file);

    let path = Path::new(file);
    let document =
        parse_file(path).with_context(|| format!("Failed to parse job document: {}", file))?;

    let context = ValidationContext::new()
        .with_collect_all(collect_all)
        .with_warn_ambiguous(warn_ambiguous);

    let validator = JobValidator::new();
    let report = validator.validate_with_context(&document, &context);

    output::print_validation_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
