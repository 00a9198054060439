//! Loader for job documents (JSON/YAML/TOML formats).
//!
//! Job documents are usually written as JSON, but YAML and TOML files with
//! the same structure are accepted too. Every format decodes into the same
//! `serde_json::Value` tree that the validator walks.
//!
//! # Example
//!
//! ```rust
//! use jobs_parser::parse_json;
//!
//! let json = r#"{"jobs": [{"wifi_api": "wifi_scan"}]}"#;
//!
//! let document = parse_json(json).expect("Failed to parse document");
//! assert_eq!(document["jobs"][0]["wifi_api"], "wifi_scan");
//! ```

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a document from a JSON string.
pub fn parse_json(content: &str) -> Result<Value> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a document from a YAML string.
///
/// # Example
///
/// ```rust
/// use jobs_parser::parse_yaml;
///
/// let yaml = r#"
/// infinite_loops: false
/// jobs:
///   - gnss_autonomous_capture_mode: dual
/// "#;
///
/// let document = parse_yaml(yaml).unwrap();
/// assert_eq!(document["jobs"][0]["gnss_autonomous_capture_mode"], "dual");
/// ```
pub fn parse_yaml(content: &str) -> Result<Value> {
    Ok(serde_yaml_ng::from_str(content)?)
}

/// Parse a document from a TOML string.
///
/// # Example
///
/// ```rust
/// use jobs_parser::parse_toml;
///
/// let toml = r#"
/// infinite_loops = true
///
/// [[jobs]]
/// wifi_api = "wifi_scan"
/// wifi_channels = ["CHANNEL_1", "CHANNEL_6"]
/// "#;
///
/// let document = parse_toml(toml).unwrap();
/// assert_eq!(document["jobs"][0]["wifi_channels"][1], "CHANNEL_6");
/// ```
pub fn parse_toml(content: &str) -> Result<Value> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `DocumentFormat::Json`
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a document from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use jobs_parser::parse_file;
/// use std::path::Path;
///
/// let document = parse_file(Path::new("jobs/wifi_then_gnss.json")).unwrap();
/// println!("Loaded {} jobs", document["jobs"].as_array().map_or(0, Vec::len));
/// ```
pub fn parse_file(path: &Path) -> Result<Value> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        DocumentFormat::Json => parse_json(&content),
        DocumentFormat::Yaml => parse_yaml(&content),
        DocumentFormat::Toml => parse_toml(&content),
    }
}
