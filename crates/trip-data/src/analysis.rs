//! One-shot analysis pipeline.
//!
//! Ingests a single trip log and runs both ranking queries, returning an
//! [`AnalysisReport`] ready for printing or JSON output.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use trip_core::models::{IngestSummary, SlotCount, ZoneCount};

use crate::analyzer::TripAnalyzer;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// The path that was handed to the analyzer.
    pub source: String,
    /// Ingestion counters, or `None` when the source could not be opened.
    pub ingest: Option<IngestSummary>,
    /// Wall-clock seconds spent ingesting the source.
    pub ingest_time_seconds: f64,
}

/// The complete output of [`analyze_trips`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub top_zones: Vec<ZoneCount>,
    pub top_busy_slots: Vec<SlotCount>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Ingest `path` and rank its `zones_k` busiest zones and `slots_k` busiest
/// (zone, hour) slots.
///
/// Follows the analyzer's contract: an unreadable path produces empty
/// rankings and `metadata.ingest == None`, never an error.
pub fn analyze_trips(path: &Path, zones_k: i64, slots_k: i64) -> AnalysisReport {
    let mut analyzer = TripAnalyzer::new();

    let start = Instant::now();
    analyzer.ingest_file(path);
    let ingest_time_seconds = start.elapsed().as_secs_f64();

    AnalysisReport {
        top_zones: analyzer.top_zones(zones_k),
        top_busy_slots: analyzer.top_busy_slots(slots_k),
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            source: path.display().to_string(),
            ingest: analyzer.last_summary().cloned(),
            ingest_time_seconds,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
