//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap, including date
//! validation and the default one-week reporting period.
//!
//! Examples:
//!   timereport 01.01.2020
//!   timereport 01.01.2020 31.01.2020 --table
//!   timereport 01.01.2020 --breakdown
//!   timereport --init-config

use crate::error::ReportError;
use crate::models::{DateWindow, DATE_FORMAT};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// timereport - aggregate member time-tracking reports into a project status report
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Start of the reporting period (DD.MM.YYYY)
    #[arg(value_name = "START_DATE", required_unless_present = "init_config")]
    pub start_date: Option<String>,

    /// End of the reporting period (DD.MM.YYYY); defaults to start + 6 days
    #[arg(value_name = "END_DATE")]
    pub end_date: Option<String>,

    /// Render the member table as HTML instead of plain text
    #[arg(short, long)]
    pub table: bool,

    /// Render the per-activity breakdown HTML table with a project total row
    #[arg(short, long, conflicts_with = "table")]
    pub breakdown: bool,

    /// Path to the project info document
    ///
    /// Defaults to the settings file value, or project_info.json.
    #[arg(short, long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Path to the settings file
    ///
    /// If not specified, looks for .timereport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of concurrent report fetches
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .timereport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err("Concurrency must be at least 1".to_string());
            }
        }

        // Dates are parsed for real in window(); reject garbage early here.
        if let Some(ref start) = self.start_date {
            parse_date(start).map_err(|e| e.to_string())?;
        }
        if let Some(ref end) = self.end_date {
            parse_date(end).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// The reporting period: both dates given, or start + 6 days.
    pub fn window(&self) -> Result<DateWindow, ReportError> {
        let start = parse_date(self.start_date.as_deref().unwrap_or(""))?;

        match self.end_date {
            Some(ref end) => DateWindow::new(start, parse_date(end)?),
            None => Ok(DateWindow::from_start(start)),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Parse a CLI date argument in `DD.MM.YYYY` form.
pub fn parse_date(s: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ReportError::DateFormat(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            start_date: Some("01.01.2020".to_string()),
            end_date: None,
            table: false,
            breakdown: false,
            project: None,
            config: None,
            timeout: None,
            concurrency: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_window_defaults_to_one_week() {
        let args = make_args();
        let window = args.window().unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2020, 1, 7).unwrap());
    }

    #[test]
    fn test_window_uses_explicit_end_date() {
        let mut args = make_args();
        args.end_date = Some("31.01.2020".to_string());
        let window = args.window().unwrap();
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
    }

    #[test]
    fn test_window_rejects_inverted_dates() {
        let mut args = make_args();
        args.end_date = Some("31.12.2019".to_string());
        assert!(matches!(args.window(), Err(ReportError::DateRange { .. })));
    }

    #[test]
    fn test_validation_rejects_bad_date() {
        let mut args = make_args();
        args.start_date = Some("2020-01-01".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_date_rejects_invalid_calendar_date() {
        assert!(matches!(
            parse_date("31.02.2020"),
            Err(ReportError::DateFormat(_))
        ));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
