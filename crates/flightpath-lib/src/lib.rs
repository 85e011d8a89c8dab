//! Flightpath library entry points.
//!
//! This crate loads flight punctuality records, collapses them into a
//! cancellation-optimised and a delay-optimised flight graph, and answers
//! "best route from A to B" queries over that pair. Higher-level consumers
//! (the CLI, UI controllers) should only depend on the functions exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

pub use dataset::{
    default_dataset_path, load_flight_records, read_flight_records, resolve_dataset_path,
    FlightRecord, DATASET_ENV_VAR,
};
pub use error::{Error, Result};
pub use graph::{build_graphs, select_edges, FlightEdge, FlightGraphs, Graph, Objective};
pub use output::{ItinerarySummary, RouteRenderMode};
pub use path::{shortest_paths, ParentLink, PathCost, ShortestPaths, TracedHop};
pub use routing::{
    fuzzy_airport_matches, FlightHop, Itinerary, RoutePlanner, RoutePolicy, RouteSource,
    DEFAULT_TIE_BREAK_THRESHOLD,
};
