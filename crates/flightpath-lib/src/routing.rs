//! Route resolution over the cancellation- and delay-optimised graphs.
//!
//! A query first looks for a direct flight. When one exists it always wins,
//! whatever a multi-hop itinerary might cost. Otherwise both graphs are
//! searched by cumulative cancellation rate and the two candidates are
//! compared: if their cancellation costs sit within the tie-break threshold
//! the delay-optimised itinerary is returned, otherwise the
//! cancellation-optimised one.
//!
//! # Example
//!
//! ```
//! use flightpath_lib::{FlightRecord, RoutePlanner};
//!
//! let records = vec![
//!     FlightRecord::new("A", "B", 0.02, 10.0, "X"),
//!     FlightRecord::new("B", "C", 0.01, 5.0, "X"),
//! ];
//! let planner = RoutePlanner::new(&records);
//! let itinerary = planner.find_flight_path("A", "C").unwrap();
//! assert_eq!(itinerary.hop_count(), 2);
//! ```

use serde::Serialize;
use strsim::jaro_winkler;
use tracing::debug;

use crate::dataset::FlightRecord;
use crate::error::{Error, Result};
use crate::graph::{build_graphs, FlightEdge, FlightGraphs, Objective};
use crate::path::shortest_paths;

/// Cancellation difference, in percentage points, at or below which the
/// delay-optimised candidate is preferred.
pub const DEFAULT_TIE_BREAK_THRESHOLD: f64 = 5.0;

const MAX_SUGGESTIONS: usize = 3;
const SUGGESTION_SIMILARITY: f64 = 0.8;

/// Tunables for choosing between the two candidate itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePolicy {
    pub tie_break_threshold: f64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            tie_break_threshold: DEFAULT_TIE_BREAK_THRESHOLD,
        }
    }
}

impl RoutePolicy {
    /// `true` when the two cancellation costs are close enough that delay
    /// should decide.
    pub fn prefers_delay(&self, cancellation_optimal: f64, delay_optimal: f64) -> bool {
        (cancellation_optimal - delay_optimal).abs() * 100.0 <= self.tie_break_threshold
    }

    fn choose(&self, cancellation_optimal: f64, delay_optimal: f64) -> Objective {
        if self.prefers_delay(cancellation_optimal, delay_optimal) {
            Objective::AverageDelay
        } else {
            Objective::CancellationRate
        }
    }
}

/// How an itinerary was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    /// A single non-stop flight.
    Direct,
    /// A shortest-path search over the graphs.
    Connecting,
}

/// A single flight within an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightHop {
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub cancellation_rate: f64,
    pub average_delay_minutes: f64,
}

impl FlightHop {
    fn from_edge(origin: &str, destination: &str, airline: &str, edge: &FlightEdge) -> Self {
        Self {
            airline: airline.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            cancellation_rate: edge.cancellation_rate,
            average_delay_minutes: edge.average_delay_minutes,
        }
    }
}

/// Ordered flights from the query origin to its destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub source: RouteSource,
    /// Graph the hop values were taken from.
    pub objective: Objective,
    pub hops: Vec<FlightHop>,
}

impl Itinerary {
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    pub fn total_cancellation_rate(&self) -> f64 {
        self.hops.iter().map(|hop| hop.cancellation_rate).sum()
    }

    pub fn total_average_delay_minutes(&self) -> f64 {
        self.hops.iter().map(|hop| hop.average_delay_minutes).sum()
    }

    /// Airports visited, origin first.
    pub fn airports(&self) -> Vec<&str> {
        let mut airports = Vec::with_capacity(self.hops.len() + 1);
        if let Some(first) = self.hops.first() {
            airports.push(first.origin.as_str());
        }
        airports.extend(self.hops.iter().map(|hop| hop.destination.as_str()));
        airports
    }
}

/// Answers route queries against a fixed pair of flight graphs.
///
/// The graphs are read-only once built, so a planner can be shared by
/// reference between concurrent callers.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    graphs: FlightGraphs,
    policy: RoutePolicy,
}

impl RoutePlanner {
    /// Build both graphs from `records` using the default policy.
    pub fn new(records: &[FlightRecord]) -> Self {
        let planner = Self::from_graphs(build_graphs(records));
        debug!(
            records = records.len(),
            airports = planner.graphs.by_cancellation().airport_count(),
            edges = planner.graphs.by_cancellation().edge_count(),
            "built flight graphs"
        );
        planner
    }

    pub fn from_graphs(graphs: FlightGraphs) -> Self {
        Self {
            graphs,
            policy: RoutePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn graphs(&self) -> &FlightGraphs {
        &self.graphs
    }

    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    /// Every airport known to the planner, sorted.
    pub fn airports(&self) -> Vec<&str> {
        self.graphs.by_cancellation().airports().collect()
    }

    /// Airports reachable from `origin` by a single flight, sorted.
    pub fn destinations_from(&self, origin: &str) -> Result<Vec<&str>> {
        self.ensure_known(origin)?;
        Ok(self
            .graphs
            .by_cancellation()
            .neighbours(origin)
            .map(|neighbours| neighbours.keys().map(String::as_str).collect())
            .unwrap_or_default())
    }

    /// Find the preferred itinerary from `start` to `destination`.
    pub fn find_flight_path(&self, start: &str, destination: &str) -> Result<Itinerary> {
        validate_query(start, destination)?;
        self.ensure_known(start)?;
        self.ensure_known(destination)?;

        if let Some(itinerary) = self.direct_route(start, destination)? {
            return Ok(itinerary);
        }
        self.connecting_route(start, destination)
    }

    fn direct_route(&self, start: &str, destination: &str) -> Result<Option<Itinerary>> {
        let by_cancellation = self.graphs.by_cancellation().probe(start, destination);
        let by_delay = self.graphs.by_delay().probe(start, destination);

        let (cancel_edge, delay_edge) = match (by_cancellation, by_delay) {
            (None, None) => return Ok(None),
            (Some(cancel_edge), Some(delay_edge)) => (cancel_edge, delay_edge),
            _ => return Err(missing_edge(start, destination)),
        };

        let objective = self
            .policy
            .choose(cancel_edge.cancellation_rate, delay_edge.cancellation_rate);
        debug!(
            start,
            destination,
            cancellation_optimal = cancel_edge.cancellation_rate,
            delay_optimal = delay_edge.cancellation_rate,
            %objective,
            "direct flight found"
        );

        let edge = match objective {
            Objective::CancellationRate => cancel_edge,
            Objective::AverageDelay => delay_edge,
        };
        Ok(Some(Itinerary {
            source: RouteSource::Direct,
            objective,
            hops: vec![FlightHop::from_edge(
                start,
                destination,
                &edge.airline,
                edge,
            )],
        }))
    }

    fn connecting_route(&self, start: &str, destination: &str) -> Result<Itinerary> {
        // Both searches rank by cancellation; each graph already encodes its own
        // preferred edge per pair.
        let cancel_paths = shortest_paths(
            self.graphs.by_cancellation(),
            start,
            Objective::CancellationRate,
        );
        let delay_paths = shortest_paths(
            self.graphs.by_delay(),
            start,
            Objective::CancellationRate,
        );

        let objective = match (
            cancel_paths.cost_to(destination),
            delay_paths.cost_to(destination),
        ) {
            (None, None) => {
                debug!(start, destination, "destination unreachable in both graphs");
                return Err(Error::RouteNotFound {
                    start: start.to_string(),
                    goal: destination.to_string(),
                });
            }
            (Some(cancel_cost), Some(delay_cost)) => {
                let objective = self.policy.choose(cancel_cost.primary, delay_cost.primary);
                debug!(
                    start,
                    destination,
                    cancellation_optimal = cancel_cost.primary,
                    delay_optimal = delay_cost.primary,
                    %objective,
                    "connecting route selected"
                );
                objective
            }
            (Some(_), None) => Objective::CancellationRate,
            (None, Some(_)) => Objective::AverageDelay,
        };

        let paths = match objective {
            Objective::CancellationRate => &cancel_paths,
            Objective::AverageDelay => &delay_paths,
        };
        let traced = paths
            .trace(destination)
            .ok_or_else(|| Error::RouteNotFound {
                start: start.to_string(),
                goal: destination.to_string(),
            })?;

        let graph = self.graphs.for_objective(objective);
        let hops = traced
            .iter()
            .map(|hop| {
                graph
                    .probe(hop.origin, hop.destination)
                    .map(|edge| FlightHop::from_edge(hop.origin, hop.destination, hop.airline, edge))
                    .ok_or_else(|| missing_edge(hop.origin, hop.destination))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Itinerary {
            source: RouteSource::Connecting,
            objective,
            hops,
        })
    }

    fn ensure_known(&self, airport: &str) -> Result<()> {
        let graph = self.graphs.by_cancellation();
        if graph.contains(airport) {
            return Ok(());
        }
        Err(Error::UnknownAirport {
            name: airport.to_string(),
            suggestions: fuzzy_airport_matches(graph.airports(), airport, MAX_SUGGESTIONS),
        })
    }
}

fn validate_query(start: &str, destination: &str) -> Result<()> {
    if start.trim().is_empty() || destination.trim().is_empty() {
        return Err(Error::invalid_query(
            "both origin and destination must be provided",
        ));
    }
    if start == destination {
        return Err(Error::invalid_query(
            "origin airport cannot be the same as the destination",
        ));
    }
    Ok(())
}

fn missing_edge(origin: &str, destination: &str) -> Error {
    Error::MissingEdge {
        origin: origin.to_string(),
        destination: destination.to_string(),
    }
}

/// Airports whose names resemble `name`, most similar first.
pub fn fuzzy_airport_matches<'a>(
    airports: impl Iterator<Item = &'a str>,
    name: &str,
    limit: usize,
) -> Vec<String> {
    let needle = name.to_uppercase();
    let mut scored: Vec<(f64, &str)> = airports
        .map(|airport| (jaro_winkler(&needle, &airport.to_uppercase()), airport))
        .filter(|(score, _)| *score >= SUGGESTION_SIMILARITY)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, airport)| airport.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_threshold_is_inclusive() {
        let policy = RoutePolicy::default();
        assert!(policy.prefers_delay(0.10, 0.06));
        assert!(policy.prefers_delay(0.100, 0.051));
        assert!(!policy.prefers_delay(0.100, 0.049));
    }

    #[test]
    fn custom_threshold_changes_preference() {
        let strict = RoutePolicy {
            tie_break_threshold: 1.0,
        };
        assert!(!strict.prefers_delay(0.10, 0.06));
    }

    #[test]
    fn validation_rejects_empty_and_identical_endpoints() {
        assert!(validate_query("", "B").unwrap_err().is_invalid_query());
        assert!(validate_query("A", "  ").unwrap_err().is_invalid_query());
        assert!(validate_query("A", "A").unwrap_err().is_invalid_query());
        assert!(validate_query("A", "B").is_ok());
    }

    #[test]
    fn fuzzy_matches_prefer_closest_name() {
        let airports = ["LONDON HEATHROW", "LONDON GATWICK", "ABERDEEN"];
        let matches = fuzzy_airport_matches(airports.into_iter(), "london heathrw", 3);

        assert_eq!(matches.first().map(String::as_str), Some("LONDON HEATHROW"));
        assert!(!matches.iter().any(|m| m == "ABERDEEN"));
    }

    #[test]
    fn itinerary_airports_follow_hops() {
        let itinerary = Itinerary {
            source: RouteSource::Connecting,
            objective: Objective::CancellationRate,
            hops: vec![
                FlightHop {
                    airline: "X".to_string(),
                    origin: "A".to_string(),
                    destination: "B".to_string(),
                    cancellation_rate: 0.02,
                    average_delay_minutes: 10.0,
                },
                FlightHop {
                    airline: "X".to_string(),
                    origin: "B".to_string(),
                    destination: "C".to_string(),
                    cancellation_rate: 0.01,
                    average_delay_minutes: 5.0,
                },
            ],
        };

        assert_eq!(itinerary.airports(), vec!["A", "B", "C"]);
        assert!((itinerary.total_cancellation_rate() - 0.03).abs() < 1e-12);
        assert_eq!(itinerary.total_average_delay_minutes(), 15.0);
    }
}
