use anyhow::{Context, Result};
use jobs_validator::JobsSchema;
use std::fs;
use tracing::info;

use crate::output;

pub fn execute(output_path: Option<&str>) -> Result<()> {
    let schema = JobsSchema::default_schema().to_json_schema();
    let rendered =
        serde_json::to_string_pretty(&schema).context("Failed to serialize job schema")?;

    match output_path {
        Some(path) => {
            info!("Writing job schema to {}", path);
            fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write schema file: {}", path))?;
            output::print_success(&format!("Schema written to {}", path));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
