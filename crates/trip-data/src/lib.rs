//! Data layer for the trip analyzer.
//!
//! Reads trip-log CSV files, builds the per-zone and per-slot pickup
//! frequency tables, answers the top-K ranking queries and bundles them into
//! an analysis report.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod reader;

#[cfg(test)]
mod fixtures;

pub use analyzer::TripAnalyzer;
pub use trip_core as core;
