//! Job schema definitions.
//!
//! A job document is an envelope holding a list of job records. Each record
//! is one of three kinds, all built on the same common base:
//!
//! - `WifiJob`: passive Wi-Fi scan or country-code lookup
//! - `GnssAutonomousJob`: GNSS scan without assistance data
//! - `GnssAssistedJob`: GNSS scan seeded with an approximate position
//!
//! Records carry no explicit kind tag. A Wifi record is identified by its
//! required `wifi_api`; a GNSS record by the presence of at least one field
//! with its kind's prefix.

use jobs_core::{
    Constraint, NumberBounds, Pattern, RecordShape, RecordShapeBuilder, Result, WifiChannel,
};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

pub const WIFI_APIS: [&str; 2] = ["wifi_scan", "country_code"];
pub const WIFI_TYPES: [&str; 2] = ["TYPE_B", "TYPE_G"];
pub const WIFI_MODES: [&str; 2] = ["beacon_and_packet", "beacon_only"];
pub const GNSS_OPTIONS: [&str; 2] = ["best_effort", "default"];
pub const GNSS_CAPTURE_MODES: [&str; 2] = ["single", "dual"];
pub const GNSS_ANTENNA_SELECTIONS: [&str; 3] =
    ["no_selection", "select_antenna_1", "select_antenna_2"];
pub const GNSS_CONSTELLATIONS: [&str; 2] = ["gps", "beidou"];

/// Envelope field holding the job list.
pub const JOBS_FIELD: &str = "jobs";

/// Largest satellite count a GNSS job may request.
pub const MAX_NB_SATELLITE: f64 = 255.0;

/// Kind of a job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobKind {
    Wifi,
    GnssAutonomous,
    GnssAssisted,
}

impl JobKind {
    /// Every kind, in the order candidates are tried.
    pub const ALL: [JobKind; 3] = [JobKind::Wifi, JobKind::GnssAutonomous, JobKind::GnssAssisted];

    /// Name of the record shape describing this kind.
    pub fn shape_name(&self) -> &'static str {
        match self {
            JobKind::Wifi => "WifiJob",
            JobKind::GnssAutonomous => "GnssAutonomousJob",
            JobKind::GnssAssisted => "GnssAssistedJob",
        }
    }

    /// Short identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Wifi => "wifi",
            JobKind::GnssAutonomous => "gnss_autonomous",
            JobKind::GnssAssisted => "gnss_assisted",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn enumeration(choices: &[&str]) -> Result<Constraint> {
    Ok(Constraint::PatternString(Pattern::one_of(choices)?))
}

fn counter() -> Constraint {
    Constraint::BoundedNumber(NumberBounds::non_negative_integer())
}

/// Fields shared by every job kind.
pub fn common_job() -> Result<RecordShape> {
    RecordShapeBuilder::new("CommonJob")
        .optional("name", Constraint::AnyString)
        .optional("n_iterations", counter())
        .optional("reset_before_job_start", Constraint::Boolean)
        .try_build()
}

/// Wi-Fi scan job, with channel names drawn from `channels`.
pub fn wifi_job<I, S>(common: &RecordShape, channels: I) -> Result<RecordShape>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let channel = Constraint::PatternString(Pattern::one_of(channels)?);

    RecordShapeBuilder::extending(JobKind::Wifi.shape_name(), common)
        .description("Passive Wi-Fi scan")
        .required("wifi_api", enumeration(&WIFI_APIS)?)
        .optional("wifi_channels", Constraint::sequence(channel))
        .optional("wifi_types", Constraint::sequence(enumeration(&WIFI_TYPES)?))
        .optional("wifi_nbr_retrial", counter())
        .optional("wifi_max_result_per_scan", counter())
        .optional("wifi_timeout", counter())
        .optional("wifi_mode", enumeration(&WIFI_MODES)?)
        .discriminator("wifi_api")
        .try_build()
}

/// Position hint carried by assisted GNSS jobs.
pub fn assisted_coordinate() -> Result<RecordShape> {
    let coordinate = || Constraint::BoundedNumber(NumberBounds::any());

    RecordShapeBuilder::new("AssistedCoordinate")
        .optional("latitude", coordinate())
        .optional("longitude", coordinate())
        .optional("altitude", coordinate())
        .try_build()
}

/// The five scan settings both GNSS kinds share, under their own prefix.
fn gnss_job(kind: JobKind, prefix: &str, common: &RecordShape) -> Result<RecordShapeBuilder> {
    let names = [
        format!("{prefix}_option"),
        format!("{prefix}_capture_mode"),
        format!("{prefix}_nb_satellite"),
        format!("{prefix}_antenna_selection"),
        format!("{prefix}_constellations"),
    ];
    let [option, capture_mode, nb_satellite, antenna_selection, constellations] = names.clone();

    Ok(RecordShapeBuilder::extending(kind.shape_name(), common)
        .optional(option, enumeration(&GNSS_OPTIONS)?)
        .optional(capture_mode, enumeration(&GNSS_CAPTURE_MODES)?)
        .optional(
            nb_satellite,
            Constraint::BoundedNumber(NumberBounds::integer_in(0.0, MAX_NB_SATELLITE)),
        )
        .optional(antenna_selection, enumeration(&GNSS_ANTENNA_SELECTIONS)?)
        .optional(
            constellations,
            Constraint::sequence(enumeration(&GNSS_CONSTELLATIONS)?),
        )
        .discriminators(names))
}

/// GNSS scan without assistance data.
pub fn gnss_autonomous_job(common: &RecordShape) -> Result<RecordShape> {
    gnss_job(JobKind::GnssAutonomous, "gnss_autonomous", common)?
        .description("Autonomous GNSS scan")
        .try_build()
}

/// GNSS scan seeded with an approximate position.
pub fn gnss_assisted_job(common: &RecordShape) -> Result<RecordShape> {
    gnss_job(JobKind::GnssAssisted, "gnss_assisted", common)?
        .description("Assisted GNSS scan")
        .optional("assisted_coordinate", Constraint::Record(assisted_coordinate()?))
        .discriminator("assisted_coordinate")
        .try_build()
}

/// Compiled schema for job documents.
///
/// Built once and shared; holds nothing specific to any document.
#[derive(Debug, Clone)]
pub struct JobsSchema {
    document: Constraint,
    kinds: Vec<RecordShape>,
}

impl JobsSchema {
    /// The schema built from the full LR1110 channel table.
    pub fn default_schema() -> &'static JobsSchema {
        static DEFAULT: LazyLock<JobsSchema> = LazyLock::new(|| {
            jobs_schema(WifiChannel::names()).expect("built-in job schema is well formed")
        });
        &DEFAULT
    }

    /// Shape of a whole document.
    pub fn document(&self) -> &Constraint {
        &self.document
    }

    /// Job shapes in the order they are tried; position `i` describes
    /// `JobKind::ALL[i]`.
    pub fn kinds(&self) -> &[RecordShape] {
        &self.kinds
    }

    /// Shape describing one job kind.
    pub fn kind(&self, kind: JobKind) -> &RecordShape {
        &self.kinds[kind as usize]
    }

    /// Renders the document shape as JSON Schema.
    pub fn to_json_schema(&self) -> Value {
        jobs_core::to_json_schema(&self.document)
    }
}

/// Builds the document schema for a given channel table.
///
/// # Example
///
/// ```rust
/// use jobs_validator::jobs_schema;
///
/// // A board restricted to the non-overlapping channels.
/// let schema = jobs_schema(["CHANNEL_1", "CHANNEL_6", "CHANNEL_11"]).unwrap();
/// assert_eq!(schema.kinds().len(), 3);
/// ```
pub fn jobs_schema<I, S>(channels: I) -> Result<JobsSchema>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let common = common_job()?;
    let kinds = vec![
        wifi_job(&common, channels)?,
        gnss_autonomous_job(&common)?,
        gnss_assisted_job(&common)?,
    ];

    let envelope = RecordShapeBuilder::new("JobsDocument")
        .description("List of jobs to run on the evaluation kit")
        .optional("infinite_loops", Constraint::Boolean)
        .optional(
            JOBS_FIELD,
            Constraint::sequence(Constraint::OneOf(kinds.clone())),
        )
        .try_build()?;

    Ok(JobsSchema {
        document: Constraint::Record(envelope),
        kinds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobs_core::SchemaError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kinds_in_trial_order() {
        let schema = JobsSchema::default_schema();
        let names: Vec<&str> = schema.kinds().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["WifiJob", "GnssAutonomousJob", "GnssAssistedJob"]);
        for kind in JobKind::ALL {
            assert_eq!(schema.kind(kind).name, kind.shape_name());
        }
    }

    #[test]
    fn test_every_kind_extends_common_job() {
        let schema = JobsSchema::default_schema();
        for shape in schema.kinds() {
            for common in ["name", "n_iterations", "reset_before_job_start"] {
                let field = shape.field(common).expect("common field present");
                assert!(!field.required);
            }
        }
    }

    #[test]
    fn test_wifi_api_is_only_required_field() {
        let schema = JobsSchema::default_schema();
        let required: Vec<&str> = schema
            .kinds()
            .iter()
            .flat_map(|k| k.required_fields())
            .collect();
        assert_eq!(required, vec!["wifi_api"]);
    }

    #[test]
    fn test_gnss_discriminators() {
        let schema = JobsSchema::default_schema();
        assert_eq!(
            schema.kind(JobKind::GnssAutonomous).discriminators,
            vec![
                "gnss_autonomous_option",
                "gnss_autonomous_capture_mode",
                "gnss_autonomous_nb_satellite",
                "gnss_autonomous_antenna_selection",
                "gnss_autonomous_constellations",
            ]
        );
        assert!(
            schema
                .kind(JobKind::GnssAssisted)
                .discriminators
                .contains(&"assisted_coordinate".to_string())
        );
    }

    #[test]
    fn test_nb_satellite_bounds() {
        let schema = JobsSchema::default_schema();
        let field = schema
            .kind(JobKind::GnssAssisted)
            .field("gnss_assisted_nb_satellite")
            .unwrap();
        assert_eq!(
            field.constraint,
            Constraint::BoundedNumber(NumberBounds::integer_in(0.0, 255.0))
        );
    }

    #[test]
    fn test_channel_table_is_injected() {
        let schema = jobs_schema(["CHANNEL_1"]).unwrap();
        let exported = schema.to_json_schema();
        let pattern = &exported["properties"]["jobs"]["items"]["anyOf"][0]["properties"]
            ["wifi_channels"]["items"]["pattern"];
        assert_eq!(pattern, "^(?:CHANNEL_1)$");
    }

    #[test]
    fn test_empty_channel_table() {
        let result = jobs_schema(Vec::<String>::new());
        assert_eq!(result.unwrap_err(), SchemaError::EmptyEnumeration);
    }

    #[test]
    fn test_job_kind_names() {
        assert_eq!(JobKind::GnssAssisted.to_string(), "gnss_assisted");
        assert_eq!(JobKind::Wifi.shape_name(), "WifiJob");
    }
}
