//! Terminal styling for the enhanced itinerary view.
//!
//! Colors are resolved once into a [`ColorPalette`]; a plain palette holds
//! empty strings so renderers can interpolate unconditionally.

use std::env;

/// ANSI escape codes used by the enhanced renderer.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    // Badges are bold reverse video so they read as labels.
    pub const TAG_DEPART: &str = "\x1b[1;7;32m";
    pub const TAG_CONNECT: &str = "\x1b[1;7;36m";
    pub const TAG_ARRIVE: &str = "\x1b[1;7;35m";

    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    pub const GRAY: &str = "\x1b[90m";

    pub const RISK_LOW: &str = "\x1b[32m";
    pub const RISK_MODERATE: &str = "\x1b[38;5;208m";
    pub const RISK_HIGH: &str = "\x1b[31m";
}

/// Cancellation percentage above which a flight is moderate risk.
pub const MODERATE_RISK_PERCENT: f64 = 1.0;
/// Cancellation percentage above which a flight is high risk.
pub const HIGH_RISK_PERCENT: f64 = 2.0;

/// Coarse bucket for a cancellation percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationRisk {
    Low,
    Moderate,
    High,
}

impl CancellationRisk {
    pub fn from_percent(percent: f64) -> Self {
        if percent > HIGH_RISK_PERCENT {
            CancellationRisk::High
        } else if percent > MODERATE_RISK_PERCENT {
            CancellationRisk::Moderate
        } else {
            CancellationRisk::Low
        }
    }
}

/// Escape sequences for one rendering pass, or empty strings when color is off.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_depart: &'static str,
    pub tag_connect: &'static str,
    pub tag_arrive: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    risk: [&'static str; 3],
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_depart: colors::TAG_DEPART,
            tag_connect: colors::TAG_CONNECT,
            tag_arrive: colors::TAG_ARRIVE,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            risk: [colors::RISK_LOW, colors::RISK_MODERATE, colors::RISK_HIGH],
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_depart: "",
            tag_connect: "",
            tag_arrive: "",
            white_bold: "",
            gray: "",
            risk: ["", "", ""],
        }
    }

    /// Colored unless the environment opts out.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    #[must_use]
    pub fn for_risk(&self, risk: CancellationRisk) -> &'static str {
        match risk {
            CancellationRisk::Low => self.risk[0],
            CancellationRisk::Moderate => self.risk[1],
            CancellationRisk::High => self.risk[2],
        }
    }

    /// Color used for a cancellation percentage.
    #[must_use]
    pub fn for_cancellation(&self, percent: f64) -> &'static str {
        self.for_risk(CancellationRisk::from_percent(percent))
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether stdout should receive ANSI colors, honouring `NO_COLOR` and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    color_allowed(
        env::var_os("NO_COLOR").is_some(),
        env::var("TERM").ok().as_deref(),
    )
}

fn color_allowed(no_color_set: bool, term: Option<&str>) -> bool {
    !no_color_set && !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_buckets_follow_thresholds() {
        assert_eq!(CancellationRisk::from_percent(0.4), CancellationRisk::Low);
        assert_eq!(CancellationRisk::from_percent(1.0), CancellationRisk::Low);
        assert_eq!(CancellationRisk::from_percent(1.17), CancellationRisk::Moderate);
        assert_eq!(CancellationRisk::from_percent(2.0), CancellationRisk::Moderate);
        assert_eq!(CancellationRisk::from_percent(3.5), CancellationRisk::High);
    }

    #[test]
    fn colored_palette_maps_risk_to_escape_codes() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.for_cancellation(0.2), colors::RISK_LOW);
        assert_eq!(palette.for_cancellation(1.5), colors::RISK_MODERATE);
        assert_eq!(palette.for_cancellation(3.0), colors::RISK_HIGH);
    }

    #[test]
    fn plain_palette_is_empty_for_every_risk() {
        let palette = ColorPalette::plain();
        for percent in [0.2, 1.5, 3.0] {
            assert!(palette.for_cancellation(percent).is_empty());
        }
        assert!(palette.tag_depart.is_empty());
        assert!(palette.reset.is_empty());
    }

    #[test]
    fn no_color_or_dumb_terminal_disables_color() {
        assert!(!color_allowed(true, Some("xterm-256color")));
        assert!(!color_allowed(false, Some("dumb")));
        assert!(!color_allowed(false, Some("DUMB")));
        assert!(color_allowed(false, Some("xterm-256color")));
        assert!(color_allowed(false, None));
    }
}
