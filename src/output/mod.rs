//! Report rendering.
//!
//! This module formats aggregated totals as a plain-text status report or as
//! HTML table markup.

pub mod generator;

pub use generator::{generate_breakdown_report, generate_status_report, TableFormat};
