use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{Graph, Objective};

/// Accumulated cost of reaching an airport.
///
/// Only `primary` is minimised; `secondary` is whatever the other metric sums
/// to along the primary-optimal path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCost {
    pub primary: f64,
    pub secondary: f64,
}

impl PathCost {
    pub const ZERO: PathCost = PathCost {
        primary: 0.0,
        secondary: 0.0,
    };

    pub const UNREACHABLE: PathCost = PathCost {
        primary: f64::INFINITY,
        secondary: f64::INFINITY,
    };

    pub fn is_reachable(&self) -> bool {
        self.primary.is_finite()
    }
}

/// Back-pointer recorded when an airport's distance is relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink<'g> {
    pub airport: &'g str,
    pub airline: &'g str,
}

/// One leg recovered by walking parent pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedHop<'g> {
    pub origin: &'g str,
    pub destination: &'g str,
    pub airline: &'g str,
}

/// Result of a single-source search over one graph.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g> {
    objective: Objective,
    source: Option<&'g str>,
    distances: HashMap<&'g str, PathCost>,
    parents: HashMap<&'g str, ParentLink<'g>>,
}

impl<'g> ShortestPaths<'g> {
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Search origin, or `None` when it was not a vertex of the graph.
    pub fn source(&self) -> Option<&'g str> {
        self.source
    }

    /// Recorded cost for `airport`; unreachable vertices report
    /// [`PathCost::UNREACHABLE`] and non-vertices report `None`.
    pub fn distance(&self, airport: &str) -> Option<PathCost> {
        self.distances.get(airport).copied()
    }

    /// Cost of the best path to `airport`, if one exists.
    pub fn cost_to(&self, airport: &str) -> Option<PathCost> {
        self.distance(airport).filter(PathCost::is_reachable)
    }

    pub fn parent(&self, airport: &str) -> Option<ParentLink<'g>> {
        self.parents.get(airport).copied()
    }

    /// Walk parent pointers back from `destination` and return the legs in
    /// travel order. `None` when the destination was never reached.
    pub fn trace(&self, destination: &str) -> Option<Vec<TracedHop<'g>>> {
        let source = self.source?;
        let (&goal, _) = self.distances.get_key_value(destination)?;

        let mut hops = Vec::new();
        let mut current = goal;
        while current != source {
            let link = self.parents.get(current)?;
            hops.push(TracedHop {
                origin: link.airport,
                destination: current,
                airline: link.airline,
            });
            current = link.airport;
        }
        hops.reverse();
        Some(hops)
    }
}

/// Run Dijkstra's algorithm from `source`, ordering by `objective` while
/// carrying the other metric along each path.
///
/// Paths are only optimal when every edge's `objective` cost is
/// non-negative. Loaded cancellation rates always are; delays may not be.
pub fn shortest_paths<'g>(graph: &'g Graph, source: &str, objective: Objective) -> ShortestPaths<'g> {
    let mut distances: HashMap<&'g str, PathCost> = graph
        .airports()
        .map(|airport| (airport, PathCost::UNREACHABLE))
        .collect();
    let mut parents: HashMap<&'g str, ParentLink<'g>> = HashMap::new();

    let Some(source) = graph.vertex(source) else {
        return ShortestPaths {
            objective,
            source: None,
            distances,
            parents,
        };
    };

    let mut queue = BinaryHeap::new();
    distances.insert(source, PathCost::ZERO);
    queue.push(QueueEntry::new(source, PathCost::ZERO));

    while let Some(entry) = queue.pop() {
        let best = distances
            .get(entry.node)
            .map_or(f64::INFINITY, |cost| cost.primary);
        if entry.primary.0 > best {
            continue;
        }

        let Some(neighbours) = graph.neighbours(entry.node) else {
            continue;
        };

        for (next, edge) in neighbours {
            let candidate = PathCost {
                primary: entry.primary.0 + objective.primary(edge),
                secondary: entry.secondary.0 + objective.secondary(edge),
            };
            let current = distances
                .get(next.as_str())
                .map_or(f64::INFINITY, |cost| cost.primary);

            if candidate.primary < current {
                distances.insert(next.as_str(), candidate);
                parents.insert(
                    next.as_str(),
                    ParentLink {
                        airport: entry.node,
                        airline: edge.airline.as_str(),
                    },
                );
                queue.push(QueueEntry::new(next.as_str(), candidate));
            }
        }
    }

    ShortestPaths {
        objective,
        source: Some(source),
        distances,
        parents,
    }
}

#[derive(Copy, Clone, Debug)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'g> {
    node: &'g str,
    primary: FloatOrd,
    secondary: FloatOrd,
}

impl<'g> QueueEntry<'g> {
    fn new(node: &'g str, cost: PathCost) -> Self {
        Self {
            node,
            primary: FloatOrd(cost.primary),
            secondary: FloatOrd(cost.secondary),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by primary cost.
        other
            .primary
            .cmp(&self.primary)
            .then_with(|| other.node.cmp(self.node))
            .then_with(|| other.secondary.cmp(&self.secondary))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
