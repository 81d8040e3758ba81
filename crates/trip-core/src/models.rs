use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Composite aggregation key for one (zone, hour-of-day) slot.
///
/// Equality and hashing cover both fields jointly. The zone is kept as the
/// raw bytes read from the source so that distinct byte strings never merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Pickup zone bytes, already trimmed.
    pub zone: Vec<u8>,
    /// Hour of day in `0..=23`.
    pub hour: u8,
}

impl SlotKey {
    pub fn new(zone: impl Into<Vec<u8>>, hour: u8) -> Self {
        Self {
            zone: zone.into(),
            hour,
        }
    }

    /// The zone as text, with invalid UTF-8 replaced by U+FFFD.
    pub fn zone_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.zone)
    }
}

/// One row of a zone ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCount {
    /// Pickup zone.
    pub zone: String,
    /// Number of well-formed records seen for the zone.
    pub count: u64,
}

impl ZoneCount {
    pub fn new(zone: impl Into<String>, count: u64) -> Self {
        Self {
            zone: zone.into(),
            count,
        }
    }
}

/// One row of a busy-slot ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCount {
    /// Pickup zone.
    pub zone: String,
    /// Hour of day in `0..=23`.
    pub hour: u8,
    /// Number of well-formed records seen for the (zone, hour) pair.
    pub count: u64,
}

impl SlotCount {
    pub fn new(zone: impl Into<String>, hour: u8, count: u64) -> Self {
        Self {
            zone: zone.into(),
            hour,
            count,
        }
    }
}

/// Counters collected while streaming one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Data lines read after the header, empty ones included.
    pub lines_read: u64,
    /// Lines that produced a valid (zone, hour) pair.
    pub records_accepted: u64,
    /// Non-empty lines the parser rejected.
    pub records_skipped: u64,
    /// Empty lines skipped before parsing.
    pub empty_lines: u64,
    /// Distinct zones after the scan.
    pub distinct_zones: usize,
    /// Distinct (zone, hour) slots after the scan.
    pub distinct_slots: usize,
}
