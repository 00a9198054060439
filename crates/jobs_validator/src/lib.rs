//! # Job Document Validator
//!
//! Validation engine for LR1110 job documents. This crate provides:
//!
//! - The job schema: a common base and the Wi-Fi, autonomous GNSS and
//!   assisted GNSS job kinds built on it
//! - A recursive interpreter checking any document against a constraint tree
//! - Classification of job records and per-job validation reports
//!
//! ## Example
//!
//! ```rust
//! use jobs_core::ValidationContext;
//! use jobs_validator::JobValidator;
//! use serde_json::json;
//!
//! let document = json!({
//!     "infinite_loops": false,
//!     "jobs": [
//!         {"name": "scan", "wifi_api": "wifi_scan", "wifi_mode": "beacon_only"},
//!         {"gnss_autonomous_nb_satellite": 4, "gnss_autonomous_constellations": ["gps"]}
//!     ]
//! });
//!
//! let validator = JobValidator::new();
//! let report = validator.validate_with_context(&document, &ValidationContext::new());
//!
//! if report.passed {
//!     println!("Validation passed!");
//! } else {
//!     println!("Validation failed: {:?}", report.errors);
//! }
//! ```

mod engine;
mod error;
mod jobs;
mod primitives;
mod trail;

pub use engine::*;
pub use error::*;
pub use jobs::*;
