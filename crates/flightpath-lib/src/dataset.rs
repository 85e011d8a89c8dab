//! Flight punctuality dataset loading.
//!
//! The dataset is a CSV export with one row per (reporting airport,
//! destination, airline) combination. Only the columns needed for routing are
//! read; everything else in the file is ignored.

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default filename for the flight dataset.
const DATASET_FILENAME: &str = "flight_punctuality.csv";

/// Environment variable that overrides the dataset location.
pub const DATASET_ENV_VAR: &str = "FLIGHTPATH_DATASET";

const REQUIRED_COLUMNS: &[&str] = &[
    "reporting_airport",
    "origin_destination",
    "airline_name",
    "flights_cancelled_percent",
    "average_delay_mins",
    "number_flights_matched",
];

/// A single scheduled connection as reported in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub origin: String,
    pub destination: String,
    pub cancellation_rate: f64,
    pub average_delay_minutes: f64,
    pub airline: String,
    /// Number of flights the statistics were matched against.
    pub flights_matched: f64,
}

impl FlightRecord {
    /// Build a record in memory; `flights_matched` defaults to one.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        cancellation_rate: f64,
        average_delay_minutes: f64,
        airline: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            cancellation_rate,
            average_delay_minutes,
            airline: airline.into(),
            flights_matched: 1.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FlightRow {
    reporting_airport: String,
    origin_destination: String,
    airline_name: String,
    // Metric cells stay raw until the row survives the matched-flights filter;
    // dropped rows often leave them blank.
    flights_cancelled_percent: String,
    average_delay_mins: String,
    number_flights_matched: Option<f64>,
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "flightpath", "flightpath")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve where the dataset should be read from.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `FLIGHTPATH_DATASET` environment variable.
/// 3. Platform-specific project data directory.
///
/// Paths without an extension are treated as directories containing
/// `flight_punctuality.csv`. Existence is checked when the dataset is loaded.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATASET_ENV_VAR) {
        return Ok(canonical_dataset_path(Path::new(&env_path)));
    }

    default_dataset_path()
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }

    path.join(DATASET_FILENAME)
}

/// Load flight records from a CSV file on disk.
pub fn load_flight_records(path: &Path) -> Result<Vec<FlightRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path)?;
    let records = read_flight_records(file)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "loaded flight dataset"
    );
    Ok(records)
}

/// Read flight records from any CSV source.
///
/// Rows with no matched flights carry no usable statistics and are dropped.
pub fn read_flight_records<R: Read>(reader: R) -> Result<Vec<FlightRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();

    if !missing.is_empty() {
        return Err(Error::DatasetValidation {
            message: format!(
                "dataset missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in csv_reader.deserialize::<FlightRow>().enumerate() {
        let record_number = index + 1;
        let row = row.map_err(|err| Error::DatasetValidation {
            message: format!("record {record_number}: {err}"),
        })?;

        let flights_matched = match row.number_flights_matched {
            Some(matched) if matched > 0.0 => matched,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let cancellation_rate = parse_metric(
            record_number,
            "flights_cancelled_percent",
            &row.flights_cancelled_percent,
        )?;
        if cancellation_rate < 0.0 {
            return Err(Error::DatasetValidation {
                message: format!(
                    "record {record_number}: flights_cancelled_percent must be non-negative, got {cancellation_rate}"
                ),
            });
        }
        // Early arrivals report negative delays; delay is never a search cost.
        let average_delay_minutes =
            parse_metric(record_number, "average_delay_mins", &row.average_delay_mins)?;

        records.push(FlightRecord {
            origin: row.reporting_airport,
            destination: row.origin_destination,
            cancellation_rate,
            average_delay_minutes,
            airline: row.airline_name,
            flights_matched,
        });
    }

    debug!(kept = records.len(), skipped, "filtered rows without matched flights");
    Ok(records)
}

fn parse_metric(record_number: usize, column: &str, raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Err(Error::DatasetValidation {
            message: format!("record {record_number}: {column} is empty"),
        });
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::DatasetValidation {
            message: format!("record {record_number}: {column} must be a finite number, got '{raw}'"),
        }),
    }
}
