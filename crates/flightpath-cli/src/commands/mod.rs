// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod airports;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use flightpath_lib::{load_flight_records, resolve_dataset_path, RoutePlanner, RoutePolicy};

/// Resolve the dataset, load it, and build a planner with `policy`.
pub fn load_planner(dataset: Option<&Path>, policy: RoutePolicy) -> Result<RoutePlanner> {
    let path = resolve_dataset_path(dataset).context("failed to resolve the flight dataset")?;
    let records = load_flight_records(&path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))?;
    Ok(RoutePlanner::new(&records).with_policy(policy))
}
