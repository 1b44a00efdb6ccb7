//! Folding time entries into totals.
//!
//! One ordered pass over the entries; addition is commutative so order never
//! changes the result, but the pass stays streaming-friendly. No entry is
//! skipped or deduplicated.

use crate::error::ReportError;
use crate::models::{DateWindow, EntryTotals, TimeEntry};
use crate::report::parser::parse_entry;

/// Aggregate a sequence of entries against a date window.
///
/// Every entry adds to `total_hours`; entries dated inside the window
/// (inclusive on both ends) additionally add to `window_hours`; every entry
/// adds to its activity code's bucket, created at zero when unseen.
pub fn aggregate(entries: &[TimeEntry], window: &DateWindow) -> EntryTotals {
    let mut totals = EntryTotals::default();
    for entry in entries {
        totals.add(entry, window);
    }
    totals
}

/// Parse raw report lines and aggregate them in one pass.
///
/// The first malformed line aborts the whole aggregation with
/// [`ReportError::MalformedEntry`] — no partial totals are surfaced for a
/// member whose report is malformed.
pub fn aggregate_lines<'a, I>(lines: I, window: &DateWindow) -> Result<EntryTotals, ReportError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut totals = EntryTotals::default();
    for line in lines {
        totals.add(&parse_entry(line)?, window);
    }
    Ok(totals)
}
