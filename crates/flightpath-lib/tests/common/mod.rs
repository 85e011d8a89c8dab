//! Shared fixtures for integration tests.

use std::path::PathBuf;

use flightpath_lib::FlightRecord;

/// Path to the checked-in sample punctuality dataset.
#[allow(dead_code)]
pub fn fixture_csv_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/flight_punctuality_sample.csv")
}

/// Build in-memory records from `(origin, destination, cancellation, delay, airline)` tuples.
#[allow(dead_code)]
pub fn records(rows: &[(&str, &str, f64, f64, &str)]) -> Vec<FlightRecord> {
    rows.iter()
        .map(|&(origin, destination, cancel, delay, airline)| {
            FlightRecord::new(origin, destination, cancel, delay, airline)
        })
        .collect()
}
