//! # Job Schema Core
//!
//! Building blocks for describing LR1110 job documents.
//!
//! A job document lists measurement tasks (Wi-Fi scans, autonomous and
//! assisted GNSS fixes) to run on an evaluation kit. This crate holds the
//! declarative side of validating such documents:
//!
//! - **Constraint**: a rule for one value (pattern string, bounded number,
//!   boolean, sequence, nested record, candidate list)
//! - **RecordShape**: named fields with their constraints and required flags
//! - **WifiChannel**: the channel table used for Wi-Fi channel names
//! - **Export**: rendering of a constraint tree as JSON Schema
//!
//! ## Example
//!
//! ```rust
//! use jobs_core::{Constraint, NumberBounds, RecordShapeBuilder};
//!
//! let coordinate = RecordShapeBuilder::new("AssistedCoordinate")
//!     .optional("latitude", Constraint::BoundedNumber(NumberBounds::any()))
//!     .optional("longitude", Constraint::BoundedNumber(NumberBounds::any()))
//!     .try_build()
//!     .unwrap();
//!
//! let schema = jobs_core::to_json_schema(&Constraint::Record(coordinate));
//! assert_eq!(schema["title"], "AssistedCoordinate");
//! ```

pub mod builder;
pub mod channels;
pub mod constraint;
pub mod error;
pub mod export;
pub mod report;

pub use builder::*;
pub use channels::*;
pub use constraint::*;
pub use error::*;
pub use export::*;
pub use report::*;
