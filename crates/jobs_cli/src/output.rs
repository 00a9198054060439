use anyhow::Result;
use colored::*;
use jobs_core::ValidationReport;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  JOB DOCUMENT REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Jobs checked:   {}", report.stats.jobs_validated);
    for (kind, count) in &report.stats.job_kinds {
        println!("    {:<16} {}", kind, count);
    }
    println!("  Total errors:   {}", report.errors.len());
    println!("  Total warnings: {}", report.warnings.len());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}
