//! Route command handler for computing itineraries between airports.

use anyhow::{Context, Result};
use flightpath_lib::{ItinerarySummary, RoutePlanner};

use crate::output::{render_itinerary, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure airport name.
    pub from: String,
    /// Arrival airport name.
    pub to: String,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    planner: &RoutePlanner,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let itinerary = planner.find_flight_path(&args.from, &args.to)?;
    tracing::debug!(
        source = ?itinerary.source,
        objective = %itinerary.objective,
        hops = itinerary.hop_count(),
        "itinerary resolved"
    );

    let summary = ItinerarySummary::from_itinerary(&itinerary)?;
    render_itinerary(&summary, format).context("failed to write itinerary")?;
    Ok(())
}
