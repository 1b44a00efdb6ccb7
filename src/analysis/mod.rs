//! Time aggregation.
//!
//! This module folds parsed time entries into per-member and project-wide
//! totals.

pub mod aggregator;

pub use aggregator::{aggregate, aggregate_lines};
