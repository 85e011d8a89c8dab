use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Objective;
use crate::routing::{FlightHop, Itinerary, RouteSource};

/// Presentation style for turning an [`ItinerarySummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Structured representation of an itinerary that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItinerarySummary {
    pub source: RouteSource,
    pub objective: Objective,
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub total_cancellation_rate: f64,
    pub total_average_delay_minutes: f64,
    pub flights: Vec<FlightHop>,
}

impl ItinerarySummary {
    /// Summarise an itinerary, rejecting one without flights.
    pub fn from_itinerary(itinerary: &Itinerary) -> Result<Self> {
        let (Some(first), Some(last)) = (itinerary.hops.first(), itinerary.hops.last()) else {
            return Err(Error::EmptyItinerary);
        };

        Ok(Self {
            source: itinerary.source,
            objective: itinerary.objective,
            start: first.origin.clone(),
            goal: last.destination.clone(),
            hops: itinerary.hop_count(),
            total_cancellation_rate: itinerary.total_cancellation_rate(),
            total_average_delay_minutes: itinerary.total_average_delay_minutes(),
            flights: itinerary.hops.clone(),
        })
    }

    fn source_label(&self) -> &'static str {
        match self.source {
            RouteSource::Direct => "direct",
            RouteSource::Connecting => "connecting",
        }
    }

    /// Flight count with the matching noun, e.g. `1 flight` or `2 flights`.
    pub fn flight_count_label(&self) -> String {
        if self.hops == 1 {
            "1 flight".to_string()
        } else {
            format!("{} flights", self.hops)
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} itinerary, {}, optimised for {})",
            self.start,
            self.goal,
            self.source_label(),
            self.flight_count_label(),
            self.objective
        );
        for (index, hop) in self.flights.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{:>3}: {} -> {} via {} (cancelled {:.2}%, avg delay {:.1} min)",
                index + 1,
                hop.origin,
                hop.destination,
                hop.airline,
                hop.cancellation_rate,
                hop.average_delay_minutes
            );
        }
        let _ = writeln!(
            buffer,
            "Total: cancelled {:.2}%, avg delay {:.1} min",
            self.total_cancellation_rate, self.total_average_delay_minutes
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** — _{} → {}_ ({}, {}, objective: `{}`)",
            self.start,
            self.goal,
            self.flight_count_label(),
            self.source_label(),
            self.objective
        );
        for (index, hop) in self.flights.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** → **{}** with _{}_ (`{:.2}%` cancelled, `{:.1}` min delay)",
                index + 1,
                hop.origin,
                hop.destination,
                hop.airline,
                hop.cancellation_rate,
                hop.average_delay_minutes
            );
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(origin: &str, destination: &str, airline: &str, cancel: f64, delay: f64) -> FlightHop {
        FlightHop {
            airline: airline.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            cancellation_rate: cancel,
            average_delay_minutes: delay,
        }
    }

    #[test]
    fn empty_itinerary_is_rejected() {
        let itinerary = Itinerary {
            source: RouteSource::Connecting,
            objective: Objective::CancellationRate,
            hops: Vec::new(),
        };
        assert!(ItinerarySummary::from_itinerary(&itinerary).is_err());
    }

    #[test]
    fn plain_text_lists_each_flight() {
        let itinerary = Itinerary {
            source: RouteSource::Connecting,
            objective: Objective::AverageDelay,
            hops: vec![
                hop("ABERDEEN", "LONDON HEATHROW", "BRITISH AIRWAYS", 1.2, 9.0),
                hop("LONDON HEATHROW", "DUBAI", "EMIRATES", 0.2, 14.0),
            ],
        };
        let summary = ItinerarySummary::from_itinerary(&itinerary).expect("summary");
        let text = summary.render(RouteRenderMode::PlainText);

        assert!(text.starts_with("Route: ABERDEEN -> DUBAI (connecting itinerary, 2 flights"));
        assert!(text.contains("  1: ABERDEEN -> LONDON HEATHROW via BRITISH AIRWAYS"));
        assert!(text.contains("  2: LONDON HEATHROW -> DUBAI via EMIRATES (cancelled 0.20%"));
        assert!(text.contains("Total: cancelled 1.40%, avg delay 23.0 min"));
    }

    #[test]
    fn rich_text_uses_markdown() {
        let itinerary = Itinerary {
            source: RouteSource::Direct,
            objective: Objective::CancellationRate,
            hops: vec![hop("ABERDEEN", "AMSTERDAM", "KLM", 0.8, 12.0)],
        };
        let summary = ItinerarySummary::from_itinerary(&itinerary).expect("summary");
        let text = summary.render(RouteRenderMode::RichText);

        assert!(text.contains("(1 flight, direct,"));
        assert!(text.contains("**Route**"));
        assert!(text.contains("objective: `cancellation_rate`"));
        assert!(text.contains("_KLM_"));
    }
}
