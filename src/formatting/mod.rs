//! Report formatting helpers: duration/money rendering and terminal color
//! detection.

use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    pub fn from_env() -> Self {
        // NO_COLOR per no-color.org standard
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }
        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                return Self::Always;
            }
        }
        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                return Self::Never;
            }
        }
        Self::Auto
    }

    /// Plain output preset for tests and piped export
    pub fn plain() -> Self {
        Self::Never
    }
}

fn detect_color_support() -> bool {
    if env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Format a duration given in hours for dashboard display.
///
/// Under an hour: rounded minutes (`"45m"`). Under a day: one decimal hour
/// (`"3.2h"`). Otherwise days plus rounded hours (`"2d 3h"`), hours omitted
/// when they round to zero.
pub fn format_duration_hours(hours: f64) -> String {
    if hours < 1.0 {
        return format!("{}m", (hours * 60.0).round() as i64);
    }
    if hours < 24.0 {
        return format!("{:.1}h", hours);
    }

    let mut days = (hours / 24.0).floor() as i64;
    let mut rem_hours = (hours - days as f64 * 24.0).round() as i64;
    if rem_hours == 24 {
        days += 1;
        rem_hours = 0;
    }
    if rem_hours == 0 {
        format!("{}d", days)
    } else {
        format!("{}d {}h", days, rem_hours)
    }
}

/// Format a dollar amount for dashboard display
pub fn format_money(dollars: f64) -> String {
    format!("${:.2}", dollars)
}

/// Format a percent delta with an explicit sign
pub fn format_percent_change(percent: f64) -> String {
    format!("{:+.1}%", percent)
}
