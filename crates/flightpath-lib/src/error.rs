use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the flightpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a route query is malformed (empty endpoint or identical endpoints).
    #[error("invalid route query: {reason}")]
    InvalidQuery { reason: String },

    /// Raised when an airport name is not a vertex of the flight graphs.
    #[error("unknown airport: {name}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two airports.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when an itinerary lacks any flights.
    #[error("itinerary was empty")]
    EmptyItinerary,

    /// Raised when a reconstructed path references an edge missing from its graph.
    ///
    /// Both graphs are built from the same record set, so this indicates a
    /// construction bug rather than a recoverable condition.
    #[error("flight graph is missing the edge {origin} -> {destination}")]
    MissingEdge { origin: String, destination: String },

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when the flight dataset fails validation.
    #[error("invalid flight data: {message}")]
    DatasetValidation { message: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        Error::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// `true` when the caller supplied a malformed query.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Error::InvalidQuery { .. })
    }

    /// `true` when the query was well formed but no route connects the endpoints.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_airport_lists_suggestions() {
        let error = Error::UnknownAirport {
            name: "HEATHROW".to_string(),
            suggestions: vec!["LONDON HEATHROW".to_string(), "HEATHROW T5".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "unknown airport: HEATHROW. Did you mean one of: 'LONDON HEATHROW', 'HEATHROW T5'?"
        );
    }

    #[test]
    fn unknown_airport_without_suggestions_is_terse() {
        let error = Error::UnknownAirport {
            name: "NOWHERE".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(error.to_string(), "unknown airport: NOWHERE");
    }

    #[test]
    fn query_and_route_errors_are_distinguishable() {
        let invalid = Error::invalid_query("origin is empty");
        let missing = Error::RouteNotFound {
            start: "A".to_string(),
            goal: "B".to_string(),
        };
        assert!(invalid.is_invalid_query());
        assert!(!invalid.is_route_not_found());
        assert!(missing.is_route_not_found());
        assert!(!missing.is_invalid_query());
    }
}
