//! Parsing of individual report lines.
//!
//! A report line is `DD.MM.YYYY CODE HOURS [note...]`. Anything after the
//! hours field is kept verbatim as a free-text note.

use crate::error::ReportError;
use crate::models::{TimeEntry, DATE_FORMAT};
use chrono::NaiveDate;

/// Parse one non-empty report line into a [`TimeEntry`].
///
/// The line is split on whitespace into at most four fields: date, activity
/// code, hours, and an optional rest-of-line note. Fails with
/// [`ReportError::MalformedEntry`] when fewer than three fields are present,
/// the date is not a valid `DD.MM.YYYY` calendar date, or the hours field is
/// not a valid non-negative number. Pure function, no side effects.
pub fn parse_entry(line: &str) -> Result<TimeEntry, ReportError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ReportError::malformed(
            line,
            format!("expected date, activity code and hours, got {} fields", fields.len()),
        ));
    }

    let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
        .map_err(|_| ReportError::malformed(line, format!("invalid date '{}'", fields[0])))?;

    let activity = fields[1].to_string();

    let hours: f64 = fields[2]
        .parse()
        .map_err(|_| ReportError::malformed(line, format!("invalid hours '{}'", fields[2])))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(ReportError::malformed(
            line,
            format!("hours must be a non-negative number, got '{}'", fields[2]),
        ));
    }

    let note = if fields.len() > 3 {
        Some(fields[3..].join(" "))
    } else {
        None
    };

    Ok(TimeEntry {
        date,
        activity,
        hours,
        note,
    })
}
