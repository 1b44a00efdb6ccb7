//! Error kinds for report aggregation.
//!
//! Core aggregation fails fast: the first error encountered for a member
//! aborts that member's run, and the caller aborts the whole report with a
//! message naming the member. No retries anywhere.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a project report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The project info document is missing a key or has the wrong shape.
    #[error("invalid project configuration: {0}")]
    ConfigSchema(String),

    /// A member's report page could not be fetched.
    #[error("failed to fetch report: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The fetched document has no report block to extract.
    #[error("no report block found in the fetched document")]
    ReportBlockMissing,

    /// A report line did not parse as date + activity code + hours.
    #[error("malformed report entry '{line}': {reason}")]
    MalformedEntry {
        /// The offending report line, verbatim.
        line: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A command-line date argument was not in `DD.MM.YYYY` form.
    #[error("invalid date '{0}', expected DD.MM.YYYY")]
    DateFormat(String),

    /// The reporting period starts after it ends.
    #[error("start date {start} is after end date {end}")]
    DateRange {
        /// Requested period start.
        start: NaiveDate,
        /// Requested period end.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Shorthand for a [`ReportError::MalformedEntry`].
    pub fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
