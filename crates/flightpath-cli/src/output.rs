//! Output formatting for itinerary rendering.
//!
//! This module provides formatters for rendering itinerary summaries
//! and airport listings in the formats selectable with `--format`.

use std::io::{self, Write};

use clap::ValueEnum;
use flightpath_lib::{FlightHop, ItinerarySummary, RouteRenderMode};

use crate::terminal::ColorPalette;

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one line per flight.
    #[default]
    Text,
    /// Markdown suitable for chat or notes.
    Rich,
    /// Tagged, colorized view with per-flight risk coloring.
    Enhanced,
    /// Pretty-printed JSON.
    Json,
}

/// Render an itinerary summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_itinerary(summary: &ItinerarySummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", summary.render(RouteRenderMode::PlainText));
            Ok(())
        }
        OutputFormat::Rich => {
            print!("{}", summary.render(RouteRenderMode::RichText));
            Ok(())
        }
        OutputFormat::Enhanced => {
            EnhancedRenderer::new(ColorPalette::detect()).render(summary);
            Ok(())
        }
        OutputFormat::Json => render_json(summary),
    }
}

/// Render airport names, one per line, or as a JSON array.
pub fn render_airports(airports: &[&str], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(&airports),
        OutputFormat::Rich => {
            for airport in airports {
                println!("* {airport}");
            }
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Enhanced => {
            for airport in airports {
                println!("{airport}");
            }
            Ok(())
        }
    }
}

fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Renderer for the enhanced format with colored tags.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn render(&self, summary: &ItinerarySummary) {
        print!("{}", self.render_to_string(summary));
    }

    /// Build the enhanced view without printing it.
    #[must_use]
    pub fn render_to_string(&self, summary: &ItinerarySummary) -> String {
        let p = &self.palette;
        let mut lines = vec![format!(
            "Route from {}{}{} to {}{}{} ({}, optimised for {}):",
            p.white_bold,
            summary.start,
            p.reset,
            p.white_bold,
            summary.goal,
            p.reset,
            summary.flight_count_label(),
            summary.objective
        )];

        let len = summary.flights.len();
        for (i, hop) in summary.flights.iter().enumerate() {
            let (tag_color, tag_text) = if i == 0 {
                (p.tag_depart, " DEPT ")
            } else {
                (p.tag_connect, " CONN ")
            };
            lines.push(format!(
                "{}{}{} {}{}{}",
                tag_color, tag_text, p.reset, p.white_bold, hop.origin, p.reset
            ));
            lines.push(self.flight_details(hop, i + 1 == len));
        }

        if let Some(last) = summary.flights.last() {
            lines.push(format!(
                "{} ARRV {} {}{}{}",
                p.tag_arrive, p.reset, p.white_bold, last.destination, p.reset
            ));
        }

        let risk = p.for_cancellation(summary.total_cancellation_rate);
        lines.push(format!(
            "\n{}Total cancellation:{} {}{:.2}%{}  {}Total delay:{} {:.1} min",
            p.gray,
            p.reset,
            risk,
            summary.total_cancellation_rate,
            p.reset,
            p.gray,
            p.reset,
            summary.total_average_delay_minutes
        ));

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }

    fn flight_details(&self, hop: &FlightHop, is_last: bool) -> String {
        let p = &self.palette;
        let branch = if is_last { "└─" } else { "├─" };
        format!(
            "       {}{}{} {} ({}{:.2}%{} cancelled, {:.1} min avg delay)",
            p.gray,
            branch,
            p.reset,
            hop.airline,
            p.for_cancellation(hop.cancellation_rate),
            hop.cancellation_rate,
            p.reset,
            hop.average_delay_minutes
        )
    }
}
