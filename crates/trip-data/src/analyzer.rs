//! Trip analyzer: ingestion plus the two ranking queries.
//!
//! Nothing here returns an error to the caller. An unopenable source leaves
//! the previous state in place, malformed rows are dropped, and a
//! non-positive `k` yields an empty ranking. Problems are reported through
//! `tracing` only.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};
use trip_core::error::TripError;
use trip_core::models::{IngestSummary, SlotCount, ZoneCount};
use trip_core::parser::parse_record;

use crate::aggregator::FrequencyTables;
use crate::reader::{open_source, scan_data_lines};

// ── TripAnalyzer ──────────────────────────────────────────────────────────────

/// Owns the pickup frequency tables built from the most recent ingestion.
#[derive(Debug, Clone, Default)]
pub struct TripAnalyzer {
    tables: FrequencyTables,
    last_summary: Option<IngestSummary>,
}

impl TripAnalyzer {
    /// Create an analyzer with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the tables from the CSV file at `path`.
    ///
    /// When the file cannot be opened the call is a no-op. Once it is open,
    /// both tables are cleared before the first line is read, the first line
    /// is discarded as a header, and every later non-empty line that parses
    /// is counted.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut reader = match open_source(path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        if let Err(source) = self.rebuild(&mut reader, &path.display().to_string()) {
            let e = TripError::SourceRead {
                path: path.to_path_buf(),
                source,
            };
            warn!("{}", e);
        }
    }

    /// Rebuild the tables from an already-open reader.
    ///
    /// Same pipeline as [`ingest_file`](Self::ingest_file) minus the open.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) {
        if let Err(e) = self.rebuild(&mut reader, "<reader>") {
            warn!("{}", TripError::Io(e));
        }
    }

    /// The `k` busiest zones, count descending then zone ascending.
    pub fn top_zones(&self, k: i64) -> Vec<ZoneCount> {
        self.tables.top_zones(k)
    }

    /// The `k` busiest (zone, hour) slots, count descending then zone
    /// ascending then hour ascending.
    pub fn top_busy_slots(&self, k: i64) -> Vec<SlotCount> {
        self.tables.top_slots(k)
    }

    pub fn tables(&self) -> &FrequencyTables {
        &self.tables
    }

    /// Counters from the most recent ingestion that opened its source.
    pub fn last_summary(&self) -> Option<&IngestSummary> {
        self.last_summary.as_ref()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Clear, then stream `reader` into the tables. The summary is stored
    /// even when the scan is cut short by a read error.
    fn rebuild<R: BufRead>(&mut self, reader: &mut R, label: &str) -> std::io::Result<()> {
        self.tables.clear();

        let tables = &mut self.tables;
        let mut summary = IngestSummary::default();

        let result = scan_data_lines(reader, |line| {
            summary.lines_read += 1;
            if line.is_empty() {
                summary.empty_lines += 1;
                return;
            }
            match parse_record(line) {
                Some(key) => {
                    tables.record(key);
                    summary.records_accepted += 1;
                }
                None => summary.records_skipped += 1,
            }
        });

        summary.distinct_zones = self.tables.distinct_zones();
        summary.distinct_slots = self.tables.distinct_slots();

        debug!(
            "Source {}: {} lines read, {} accepted, {} skipped, {} empty, {} zones, {} slots",
            label,
            summary.lines_read,
            summary.records_accepted,
            summary.records_skipped,
            summary.empty_lines,
            summary.distinct_zones,
            summary.distinct_slots,
        );

        self.last_summary = Some(summary);
        result.map(|_| ())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FailAfter, HEADER, SAMPLE};
    use std::io::{BufReader, Cursor, Write};
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn analyzer_for(contents: &str) -> TripAnalyzer {
        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_reader(Cursor::new(contents.as_bytes()));
        analyzer
    }

    // ── End to end ────────────────────────────────────────────────────────────

    #[test]
    fn test_sample_file_rankings() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "trips.csv", SAMPLE);

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(&path);

        assert_eq!(
            analyzer.top_zones(2),
            vec![ZoneCount::new("Downtown", 2), ZoneCount::new("Uptown", 1)]
        );
        assert_eq!(
            analyzer.top_busy_slots(3),
            vec![
                SlotCount::new("Downtown", 8, 1),
                SlotCount::new("Downtown", 9, 1),
                SlotCount::new("Uptown", 8, 1),
            ]
        );
    }

    #[test]
    fn test_sample_file_summary() {
        let analyzer = analyzer_for(SAMPLE);
        let summary = analyzer.last_summary().unwrap();

        assert_eq!(summary.lines_read, 4);
        assert_eq!(summary.records_accepted, 3);
        assert_eq!(summary.records_skipped, 1);
        assert_eq!(summary.empty_lines, 0);
        assert_eq!(summary.distinct_zones, 2);
        assert_eq!(summary.distinct_slots, 3);
    }

    #[test]
    fn test_reingest_same_file_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "trips.csv", SAMPLE);

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(&path);
        let zones = analyzer.top_zones(10);
        let slots = analyzer.top_busy_slots(10);

        analyzer.ingest_file(&path);
        assert_eq!(analyzer.top_zones(10), zones);
        assert_eq!(analyzer.top_busy_slots(10), slots);
    }

    #[test]
    fn test_ingest_replaces_previous_state() {
        let tmp = TempDir::new().unwrap();
        let first = write_csv(tmp.path(), "a.csv", SAMPLE);
        let second = write_csv(
            tmp.path(),
            "b.csv",
            &format!("{HEADER}\n9,Harbor,_,2023-02-01 17:00:00,_,_\n"),
        );

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(&first);
        analyzer.ingest_file(&second);

        assert_eq!(analyzer.top_zones(10), vec![ZoneCount::new("Harbor", 1)]);
        assert_eq!(
            analyzer.top_busy_slots(10),
            vec![SlotCount::new("Harbor", 17, 1)]
        );
    }

    // ── Missing sources ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_before_any_ingest() {
        let tmp = TempDir::new().unwrap();
        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(tmp.path().join("missing.csv"));

        assert!(analyzer.top_zones(5).is_empty());
        assert!(analyzer.top_busy_slots(5).is_empty());
        assert!(analyzer.last_summary().is_none());
    }

    #[test]
    fn test_missing_file_keeps_previous_state() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(tmp.path(), "trips.csv", SAMPLE);

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(&path);
        let before = analyzer.top_busy_slots(10);
        let summary = analyzer.last_summary().cloned();

        analyzer.ingest_file(tmp.path().join("missing.csv"));

        assert_eq!(analyzer.top_busy_slots(10), before);
        assert_eq!(analyzer.top_zones(1), vec![ZoneCount::new("Downtown", 2)]);
        assert_eq!(analyzer.last_summary().cloned(), summary);
    }

    #[test]
    fn test_empty_file_clears_state() {
        let tmp = TempDir::new().unwrap();
        let full = write_csv(tmp.path(), "full.csv", SAMPLE);
        let empty = write_csv(tmp.path(), "empty.csv", "");

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_file(&full);
        analyzer.ingest_file(&empty);

        assert!(analyzer.top_zones(10).is_empty());
        assert!(analyzer.top_busy_slots(10).is_empty());
        assert_eq!(analyzer.last_summary(), Some(&IngestSummary::default()));
    }

    #[test]
    fn test_no_ingest_queries_are_empty() {
        let analyzer = TripAnalyzer::new();
        assert!(analyzer.top_zones(3).is_empty());
        assert!(analyzer.top_busy_slots(3).is_empty());
    }

    // ── Line handling ─────────────────────────────────────────────────────────

    #[test]
    fn test_header_is_never_counted() {
        let analyzer = analyzer_for("0,Header,_,2023-01-15 10:00:00,_,_\n");
        assert!(analyzer.top_zones(10).is_empty());
    }

    #[test]
    fn test_header_only_file() {
        let analyzer = analyzer_for(HEADER);
        assert!(analyzer.top_zones(10).is_empty());
        assert_eq!(analyzer.last_summary().unwrap().lines_read, 0);
    }

    #[test]
    fn test_wrong_field_counts_are_ignored() {
        let csv = format!(
            "{HEADER}\n1,Downtown,_,2023-01-15 08:00:00,_\n2,Downtown,_,2023-01-15 08:00:00,_,_,_\n3,Uptown,_,2023-01-15 11:00:00,_,_\n"
        );
        let analyzer = analyzer_for(&csv);

        assert_eq!(analyzer.top_zones(10), vec![ZoneCount::new("Uptown", 1)]);
        assert_eq!(analyzer.last_summary().unwrap().records_skipped, 2);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let csv = format!("{HEADER}\n\n1,Uptown,_,2023-01-15 11:00:00,_,_\n\n");
        let analyzer = analyzer_for(&csv);
        let summary = analyzer.last_summary().unwrap();

        assert_eq!(summary.empty_lines, 2);
        assert_eq!(summary.records_accepted, 1);
        assert_eq!(summary.records_skipped, 0);
    }

    #[test]
    fn test_crlf_lines_are_counted() {
        let csv = format!("{HEADER}\r\n1,Uptown,_,2023-01-15 11:00:00,_,_\r\n");
        let analyzer = analyzer_for(&csv);
        assert_eq!(
            analyzer.top_busy_slots(1),
            vec![SlotCount::new("Uptown", 11, 1)]
        );
    }

    #[test]
    fn test_quoted_zone_with_comma() {
        let csv = format!("{HEADER}\n1,\"Soho, North\",_,2023-01-15 22:10:00,_,_\n");
        let analyzer = analyzer_for(&csv);
        assert_eq!(
            analyzer.top_zones(1),
            vec![ZoneCount::new("Soho, North", 1)]
        );
    }

    #[test]
    fn test_zones_are_trimmed_and_merged() {
        let csv = format!(
            "{HEADER}\n1,Uptown,_,2023-01-15 11:00:00,_,_\n2,  Uptown\t,_,2023-01-15 11:30:00,_,_\n"
        );
        let analyzer = analyzer_for(&csv);
        assert_eq!(analyzer.top_zones(5), vec![ZoneCount::new("Uptown", 2)]);
    }

    #[test]
    fn test_slot_sums_match_zone_counts() {
        let csv = format!(
            "{HEADER}\n\
             1,A,_,2023-01-15 01:00:00,_,_\n\
             2,A,_,2023-01-15 02:00:00,_,_\n\
             3,B,_,2023-01-15 02:00:00,_,_\n\
             4,A,_,2023-01-15 01:59:00,_,_\n\
             5,C,_,bogus,_,_\n\
             6,B,_,2023-01-15 23:00:00,_,_\n"
        );
        let analyzer = analyzer_for(&csv);

        for zone in analyzer.top_zones(i64::MAX) {
            let sum: u64 = analyzer
                .top_busy_slots(i64::MAX)
                .iter()
                .filter(|s| s.zone == zone.zone)
                .map(|s| s.count)
                .sum();
            assert_eq!(sum, zone.count, "zone {}", zone.zone);
        }
        assert_eq!(analyzer.tables().zone_count("C"), 0);
    }

    #[test]
    fn test_invalid_utf8_zones_are_counted_separately() {
        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_reader(Cursor::new(
            &b"h\n1,Caf\xe9,_,2023-01-15 08:00:00,_,_\n2,Caf\xe8,_,2023-01-15 08:00:00,_,_\n"[..],
        ));

        let zones = analyzer.top_zones(10);
        assert_eq!(zones.len(), 2);
        assert!(zones.iter().all(|z| z.count == 1));
        assert_eq!(analyzer.top_busy_slots(10).len(), 2);
        assert_eq!(analyzer.tables().zone_count(b"Caf\xe9"), 1);
        assert_eq!(analyzer.tables().zone_count(b"Caf\xe8"), 1);
        assert_eq!(analyzer.last_summary().unwrap().distinct_zones, 2);
    }

    #[test]
    fn test_read_error_keeps_rows_counted_so_far() {
        let source = FailAfter::new(
            b"h\n1,Downtown,_,2023-01-15 08:12:00,_,_\n2,Uptown,_,2023-01-15 09:00:00,_,_\n",
        );

        let mut analyzer = TripAnalyzer::new();
        analyzer.ingest_reader(BufReader::new(source));

        assert_eq!(
            analyzer.top_zones(10),
            vec![ZoneCount::new("Downtown", 1), ZoneCount::new("Uptown", 1)]
        );
        let summary = analyzer.last_summary().expect("summary kept after read error");
        assert_eq!(summary.lines_read, 2);
        assert_eq!(summary.records_accepted, 2);
        assert_eq!(summary.distinct_slots, 2);
    }

    #[test]
    fn test_read_error_replaces_previous_state() {
        let mut analyzer = analyzer_for(SAMPLE);
        analyzer.ingest_reader(BufReader::new(FailAfter::new(
            b"h\n9,Harbor,_,2023-02-01 17:00:00,_,_\n",
        )));

        assert_eq!(analyzer.top_zones(10), vec![ZoneCount::new("Harbor", 1)]);
    }

    #[test]
    fn test_non_positive_k_is_empty_after_ingest() {
        let analyzer = analyzer_for(SAMPLE);
        assert!(analyzer.top_zones(0).is_empty());
        assert!(analyzer.top_zones(-5).is_empty());
        assert!(analyzer.top_busy_slots(0).is_empty());
        assert!(analyzer.top_busy_slots(-5).is_empty());
    }

    #[test]
    fn test_k_past_size_returns_everything_sorted() {
        let analyzer = analyzer_for(SAMPLE);
        assert_eq!(
            analyzer.top_zones(100),
            vec![ZoneCount::new("Downtown", 2), ZoneCount::new("Uptown", 1)]
        );
        assert_eq!(analyzer.top_busy_slots(100).len(), 3);
    }
}
