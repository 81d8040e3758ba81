//! Pickup frequency tables and top-K ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use trip_core::models::{SlotCount, SlotKey, ZoneCount};

// ── FrequencyTables ───────────────────────────────────────────────────────────

/// Running pickup counts per zone and per (zone, hour) slot.
///
/// Both tables are keyed on raw zone bytes; text conversion happens only
/// when a ranking is built. For every zone, the slot counts over all hours
/// sum to the zone count.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTables {
    zone_counts: HashMap<Vec<u8>, u64>,
    slot_counts: HashMap<SlotKey, u64>,
}

impl FrequencyTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one well-formed record in both tables.
    pub fn record(&mut self, key: SlotKey) {
        match self.zone_counts.get_mut(&key.zone) {
            Some(count) => *count += 1,
            None => {
                self.zone_counts.insert(key.zone.clone(), 1);
            }
        }
        *self.slot_counts.entry(key).or_insert(0) += 1;
    }

    /// Drop every count.
    pub fn clear(&mut self) {
        self.zone_counts.clear();
        self.slot_counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.zone_counts.is_empty()
    }

    pub fn distinct_zones(&self) -> usize {
        self.zone_counts.len()
    }

    pub fn distinct_slots(&self) -> usize {
        self.slot_counts.len()
    }

    /// Pickups counted for `zone`, zero when unseen.
    pub fn zone_count(&self, zone: impl AsRef<[u8]>) -> u64 {
        self.zone_counts.get(zone.as_ref()).copied().unwrap_or(0)
    }

    /// Pickups counted for `zone` at `hour`, zero when unseen.
    pub fn slot_count(&self, zone: impl AsRef<[u8]>, hour: u8) -> u64 {
        self.slot_counts
            .get(&SlotKey::new(zone.as_ref(), hour))
            .copied()
            .unwrap_or(0)
    }

    pub fn zone_counts(&self) -> &HashMap<Vec<u8>, u64> {
        &self.zone_counts
    }

    pub fn slot_counts(&self) -> &HashMap<SlotKey, u64> {
        &self.slot_counts
    }

    /// The `k` busiest zones: count descending, then zone ascending.
    ///
    /// `k <= 0` yields an empty list; `k` past the number of zones yields
    /// every zone.
    pub fn top_zones(&self, k: i64) -> Vec<ZoneCount> {
        let Some(limit) = rank_limit(k) else {
            return Vec::new();
        };

        let mut rows: Vec<(&[u8], u64)> = self
            .zone_counts
            .iter()
            .map(|(zone, &count)| (zone.as_slice(), count))
            .collect();
        rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows.truncate(limit);

        rows.into_iter()
            .map(|(zone, count)| ZoneCount::new(String::from_utf8_lossy(zone), count))
            .collect()
    }

    /// The `k` busiest slots: count descending, then zone ascending, then
    /// hour ascending.
    pub fn top_slots(&self, k: i64) -> Vec<SlotCount> {
        let Some(limit) = rank_limit(k) else {
            return Vec::new();
        };

        let mut rows: Vec<(&SlotKey, u64)> = self
            .slot_counts
            .iter()
            .map(|(key, &count)| (key, count))
            .collect();
        rows.sort_unstable_by(|a, b| compare_slots(*a, *b));
        rows.truncate(limit);

        rows.into_iter()
            .map(|(key, count)| SlotCount::new(key.zone_lossy(), key.hour, count))
            .collect()
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

/// Count descending, then zone bytes ascending, then hour ascending.
fn compare_slots((a, a_count): (&SlotKey, u64), (b, b_count): (&SlotKey, u64)) -> Ordering {
    b_count
        .cmp(&a_count)
        .then_with(|| a.zone.cmp(&b.zone))
        .then_with(|| a.hour.cmp(&b.hour))
}

/// Map a caller-supplied `k` to a truncation length.
fn rank_limit(k: i64) -> Option<usize> {
    if k <= 0 {
        return None;
    }
    Some(usize::try_from(k).unwrap_or(usize::MAX))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
