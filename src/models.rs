//! Data models for the report aggregator.
//!
//! This module contains the core data structures used throughout the
//! application: logged time entries, the reporting period, and the
//! per-member and project-wide accumulators.

use crate::error::ReportError;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Date format used by report lines and CLI arguments (`DD.MM.YYYY`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Activity codes known up front, in breakdown column order.
///
/// Codes not on this list still accumulate; they render after the known ones.
pub const KNOWN_ACTIVITY_CODES: [&str; 11] = [
    "ME", "LC", "PP", "PR", "DO", "CO", "TE", "AD", "TM", "RE", "RD",
];

/// One logged line of time in a member's report.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// Calendar date the time was logged for.
    pub date: NaiveDate,
    /// Short token classifying the kind of work (e.g. `ME`, `LC`).
    pub activity: String,
    /// Hours logged; never negative.
    pub hours: f64,
    /// Free-text remainder of the line, if any.
    pub note: Option<String>,
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.activity,
            format_hours(self.hours)
        )?;
        if let Some(ref note) = self.note {
            write!(f, " {}", note)?;
        }
        Ok(())
    }
}

/// The inclusive date range for which "current period" totals are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period, inclusive.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::DateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A one-week window starting at `start` (the CLI default period).
    pub fn from_start(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Days::new(6),
        }
    }

    /// Whether `date` falls inside the window, inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Totals accumulated from one sequence of entries.
///
/// Starts zeroed and is fed one entry at a time. Entry order never changes
/// the result, and repeated identical entries accumulate cumulatively: each
/// line is an independent logged record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryTotals {
    /// Sum of all entry hours, regardless of any window.
    pub total_hours: f64,
    /// Sum of hours for entries dated inside the window.
    pub window_hours: f64,
    /// Hours per activity code, keyed lazily on first sight.
    pub per_activity: BTreeMap<String, f64>,
}

impl EntryTotals {
    /// Fold one entry in.
    ///
    /// An entry outside the window still counts toward `total_hours`; only
    /// `window_hours` is gated on the window ("work done ever" vs "work done
    /// in period").
    pub fn add(&mut self, entry: &TimeEntry, window: &DateWindow) {
        self.total_hours += entry.hours;
        if window.contains(entry.date) {
            self.window_hours += entry.hours;
        }
        *self
            .per_activity
            .entry(entry.activity.clone())
            .or_insert(0.0) += entry.hours;
    }
}

/// Aggregated totals for one tracked member.
///
/// Created zeroed when aggregation for the member starts, filled from that
/// member's entries, then treated as immutable.
#[derive(Debug, Clone)]
pub struct MemberTotals {
    /// Member display name from the project info document.
    pub name: String,
    /// Where the member's report page lives.
    pub report_url: String,
    /// All-time hours.
    pub total_hours: f64,
    /// Hours inside the reporting period.
    pub window_hours: f64,
    /// Hours per activity code.
    pub per_activity: BTreeMap<String, f64>,
}

impl MemberTotals {
    /// A zeroed accumulator for `name`.
    #[allow(dead_code)] // Constructor for incremental accumulation
    pub fn new(name: String, report_url: String) -> Self {
        Self {
            name,
            report_url,
            total_hours: 0.0,
            window_hours: 0.0,
            per_activity: BTreeMap::new(),
        }
    }

    /// Attach aggregated entry totals to a member.
    pub fn from_totals(name: String, report_url: String, totals: EntryTotals) -> Self {
        Self {
            name,
            report_url,
            total_hours: totals.total_hours,
            window_hours: totals.window_hours,
            per_activity: totals.per_activity,
        }
    }
}

/// Project-wide sums across all members.
///
/// Owned by one aggregation run and filled through explicit
/// [`merge`](ProjectTotals::merge) calls after each member's fold completes;
/// never mutated concurrently.
#[derive(Debug, Clone, Default)]
pub struct ProjectTotals {
    /// All-time hours across every member.
    pub total_hours: f64,
    /// Hours per activity code across every member.
    pub per_activity: BTreeMap<String, f64>,
}

impl ProjectTotals {
    /// Fold one member's totals in.
    pub fn merge(&mut self, member: &MemberTotals) {
        self.total_hours += member.total_hours;
        for (code, hours) in &member.per_activity {
            *self.per_activity.entry(code.clone()).or_insert(0.0) += hours;
        }
    }
}

/// Format an hours value deterministically, locale-independent.
///
/// Shortest decimal with at least one fractional digit: `6.0`, `2.5`, `1.25`.
pub fn format_hours(hours: f64) -> String {
    let s = hours.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}
