//! Airports command handler listing known airports or direct destinations.

use anyhow::{Context, Result};
use flightpath_lib::RoutePlanner;

use crate::output::{render_airports, OutputFormat};

/// Handle the airports subcommand.
///
/// With `from` set, lists airports served by a direct flight from it;
/// otherwise lists every airport in the dataset.
pub fn handle_airports_command(
    planner: &RoutePlanner,
    format: OutputFormat,
    from: Option<&str>,
) -> Result<()> {
    let airports = match from {
        Some(origin) => planner.destinations_from(origin)?,
        None => planner.airports(),
    };
    render_airports(&airports, format).context("failed to write airport list")?;
    Ok(())
}
