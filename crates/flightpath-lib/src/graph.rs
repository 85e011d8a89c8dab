use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::dataset::FlightRecord;

/// Outbound connections of a single airport, keyed by destination.
pub type Neighbours = BTreeMap<String, FlightEdge>;

/// Cost dimension a graph or search optimises for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    CancellationRate,
    AverageDelay,
}

impl Objective {
    /// Cost of `edge` under this objective.
    pub fn primary(self, edge: &FlightEdge) -> f64 {
        match self {
            Objective::CancellationRate => edge.cancellation_rate,
            Objective::AverageDelay => edge.average_delay_minutes,
        }
    }

    /// Cost of `edge` under the other objective; tracked but never minimised.
    pub fn secondary(self, edge: &FlightEdge) -> f64 {
        self.other().primary(edge)
    }

    pub fn other(self) -> Objective {
        match self {
            Objective::CancellationRate => Objective::AverageDelay,
            Objective::AverageDelay => Objective::CancellationRate,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Objective::CancellationRate => "cancellation_rate",
            Objective::AverageDelay => "average_delay",
        };
        f.write_str(value)
    }
}

/// The single representative connection kept for an ordered airport pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightEdge {
    pub cancellation_rate: f64,
    pub average_delay_minutes: f64,
    pub airline: String,
}

impl FlightEdge {
    pub fn from_record(record: &FlightRecord) -> Self {
        Self {
            cancellation_rate: record.cancellation_rate,
            average_delay_minutes: record.average_delay_minutes,
            airline: record.airline.clone(),
        }
    }

    /// Strictly cheaper on the primary metric, or equal there and strictly
    /// cheaper on the secondary. Full ties keep the incumbent.
    fn improves_on(&self, incumbent: &FlightEdge, objective: Objective) -> bool {
        let candidate = objective.primary(self);
        let current = objective.primary(incumbent);
        if candidate < current {
            return true;
        }
        candidate == current && objective.secondary(self) < objective.secondary(incumbent)
    }
}

/// Flight graph with at most one edge per ordered airport pair.
///
/// Every airport named in the source records is a vertex, including airports
/// that only ever appear as a destination.
#[derive(Debug, Clone)]
pub struct Graph {
    objective: Objective,
    adjacency: Arc<BTreeMap<String, Neighbours>>,
}

impl Graph {
    /// Objective used to pick between colliding edges.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Outbound edges of `airport`, or `None` when it is not a vertex.
    pub fn neighbours(&self, airport: &str) -> Option<&Neighbours> {
        self.adjacency.get(airport)
    }

    pub fn contains(&self, airport: &str) -> bool {
        self.adjacency.contains_key(airport)
    }

    /// The graph-owned key for `airport`.
    pub(crate) fn vertex(&self, airport: &str) -> Option<&str> {
        self.adjacency
            .get_key_value(airport)
            .map(|(key, _)| key.as_str())
    }

    /// Airport codes in sorted order.
    pub fn airports(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn airport_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Direct edge from `origin` to `destination`, if one exists.
    pub fn probe(&self, origin: &str, destination: &str) -> Option<&FlightEdge> {
        self.adjacency.get(origin)?.get(destination)
    }
}

/// Collapse raw records into one representative edge per ordered pair.
pub fn select_edges(records: &[FlightRecord], objective: Objective) -> Graph {
    let mut adjacency: BTreeMap<String, Neighbours> = BTreeMap::new();

    for record in records {
        let candidate = FlightEdge::from_record(record);
        let outbound = adjacency.entry(record.origin.clone()).or_default();
        match outbound.get_mut(&record.destination) {
            Some(existing) => {
                if candidate.improves_on(existing, objective) {
                    *existing = candidate;
                }
            }
            None => {
                outbound.insert(record.destination.clone(), candidate);
            }
        }
    }

    for record in records {
        adjacency.entry(record.destination.clone()).or_default();
    }

    Graph {
        objective,
        adjacency: Arc::new(adjacency),
    }
}

/// The pair of graphs a planning session routes over.
#[derive(Debug, Clone)]
pub struct FlightGraphs {
    by_cancellation: Graph,
    by_delay: Graph,
}

impl FlightGraphs {
    pub fn by_cancellation(&self) -> &Graph {
        &self.by_cancellation
    }

    pub fn by_delay(&self) -> &Graph {
        &self.by_delay
    }

    /// Graph whose edges were selected for `objective`.
    pub fn for_objective(&self, objective: Objective) -> &Graph {
        match objective {
            Objective::CancellationRate => &self.by_cancellation,
            Objective::AverageDelay => &self.by_delay,
        }
    }
}

/// Build the cancellation-optimised and delay-optimised graphs from one record set.
pub fn build_graphs(records: &[FlightRecord]) -> FlightGraphs {
    FlightGraphs {
        by_cancellation: select_edges(records, Objective::CancellationRate),
        by_delay: select_edges(records, Objective::AverageDelay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(origin: &str, destination: &str, cancel: f64, delay: f64, airline: &str) -> FlightRecord {
        FlightRecord::new(origin, destination, cancel, delay, airline)
    }

    #[test]
    fn secondary_metric_breaks_primary_ties() {
        let records = vec![
            record("A", "B", 0.4, 20.0, "First"),
            record("A", "B", 0.4, 18.0, "Second"),
        ];

        let graph = select_edges(&records, Objective::CancellationRate);
        assert_eq!(graph.probe("A", "B").map(|e| e.airline.as_str()), Some("Second"));
    }

    #[test]
    fn full_ties_keep_first_record() {
        let records = vec![
            record("A", "B", 0.4, 20.0, "First"),
            record("A", "B", 0.4, 20.0, "Second"),
        ];

        for objective in [Objective::CancellationRate, Objective::AverageDelay] {
            let graph = select_edges(&records, objective);
            assert_eq!(graph.probe("A", "B").map(|e| e.airline.as_str()), Some("First"));
        }
    }

    #[test]
    fn objectives_pick_different_edges() {
        let records = vec![
            record("A", "B", 0.8, 12.0, "Punctual"),
            record("A", "B", 0.5, 25.0, "Reliable"),
        ];

        let graphs = build_graphs(&records);
        assert_eq!(
            graphs.by_cancellation().probe("A", "B").map(|e| e.airline.as_str()),
            Some("Reliable")
        );
        assert_eq!(
            graphs.by_delay().probe("A", "B").map(|e| e.airline.as_str()),
            Some("Punctual")
        );
    }

    #[test]
    fn destination_only_airports_are_vertices() {
        let records = vec![record("A", "B", 0.1, 1.0, "X")];
        let graph = select_edges(&records, Objective::AverageDelay);

        assert!(graph.contains("B"));
        assert!(graph.neighbours("B").is_some_and(BTreeMap::is_empty));
        assert_eq!(graph.airport_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn probe_misses_return_none() {
        let records = vec![record("A", "B", 0.1, 1.0, "X")];
        let graph = select_edges(&records, Objective::CancellationRate);

        assert!(graph.probe("B", "A").is_none());
        assert!(graph.probe("Z", "A").is_none());
    }

    #[test]
    fn secondary_accessor_swaps_metrics() {
        let edge = FlightEdge {
            cancellation_rate: 0.3,
            average_delay_minutes: 7.0,
            airline: "X".to_string(),
        };
        assert_eq!(Objective::CancellationRate.secondary(&edge), 7.0);
        assert_eq!(Objective::AverageDelay.secondary(&edge), 0.3);
        assert_eq!(Objective::AverageDelay.to_string(), "average_delay");
    }
}
