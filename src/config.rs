//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::{font::FontStyle, viz::VizMode};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "lockin")]
#[command(about = "A focus timer for the terminal with animated visualizations")]
#[command(version = "2.0.0")]
#[command(after_help = "Examples:\n  lockin 30m \"deep work\"\n  lockin 25m --block Safari,Messages,Discord\n  lockin 1h30m --viz defrag\n  lockin 25m --font dot --viz binary")]
pub struct Config {
    /// Timer duration, e.g. 30s, 5m, 1h30m
    #[arg(value_parser = parse_duration)]
    pub duration: Duration,

    /// Task name shown above the timer
    pub task_name: Option<String>,

    /// Apps to keep closed while the timer runs
    #[arg(long = "block", value_delimiter = ',', value_name = "APP1,APP2")]
    pub block_apps: Vec<String>,

    /// Visualization mode
    #[arg(long, value_enum)]
    pub viz: Option<VizMode>,

    /// Timer font style
    #[arg(long, value_enum, default_value_t = FontStyle::Slim)]
    pub font: FontStyle,

    /// Seed for the random layouts, drawn at random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Apps to block, with blank entries dropped
    pub fn blocked_apps(&self) -> Vec<String> {
        self.block_apps
            .iter()
            .map(|app| app.trim())
            .filter(|app| !app.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("missing unit after {0:?} (use h, m, s or ms)")]
    MissingUnit(String),
    #[error("unknown unit {0:?} (use h, m, s or ms)")]
    UnknownUnit(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("duration must be positive")]
    NotPositive,
}

/// Parse durations like `30s`, `5m`, `1h30m` or `1.5h`
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() {
            return Err(DurationParseError::InvalidNumber(rest.to_string()));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| DurationParseError::InvalidNumber(number.to_string()))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let seconds = match unit {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 0.001,
            "" => return Err(DurationParseError::MissingUnit(number.to_string())),
            other => return Err(DurationParseError::UnknownUnit(other.to_string())),
        };
        let part = Duration::try_from_secs_f64(value * seconds)
            .map_err(|_| DurationParseError::InvalidNumber(number.to_string()))?;
        total = total
            .checked_add(part)
            .ok_or_else(|| DurationParseError::InvalidNumber(number.to_string()))?;
        rest = tail;
    }

    if total.is_zero() {
        return Err(DurationParseError::NotPositive);
    }
    Ok(total)
}

/// Compact form of `duration` for messages, e.g. `1h30m`, `45s`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let mut out = String::new();
    if h > 0 {
        out.push_str(&format!("{}h", h));
    }
    if m > 0 {
        out.push_str(&format!("{}m", m));
    }
    if s > 0 || out.is_empty() {
        out.push_str(&format!("{}s", s));
    }
    out
}
