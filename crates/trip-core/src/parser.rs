//! Record parser for trip-log lines.
//!
//! Turns one raw line into a validated [`SlotKey`] (zone plus hour of day),
//! or `None` when the line should be skipped. Malformed input never raises:
//! a real trip log carries corrupt rows and they are dropped silently.
//!
//! Lines are handled as bytes. Zones keep their exact bytes, so two zones
//! that differ only in invalid UTF-8 stay distinct.

use crate::models::SlotKey;

/// Number of columns in the trip-log schema.
pub const FIELD_COUNT: usize = 6;
/// Column holding the pickup zone.
pub const ZONE_FIELD: usize = 1;
/// Column holding the pickup datetime.
pub const DATETIME_FIELD: usize = 3;

const MAX_HOUR: u8 = 23;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse one data line into its (zone, hour) slot.
///
/// Returns `None` when the line does not split into exactly
/// [`FIELD_COUNT`] fields, when the trimmed zone or datetime is empty, or
/// when no valid hour can be extracted from the datetime.
pub fn parse_record(line: &[u8]) -> Option<SlotKey> {
    let mut fields = split_fields(line);
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let mut zone = std::mem::take(&mut fields[ZONE_FIELD]);
    let mut datetime = std::mem::take(&mut fields[DATETIME_FIELD]);
    trim_in_place(&mut zone);
    trim_in_place(&mut datetime);

    if zone.is_empty() || datetime.is_empty() {
        return None;
    }

    let hour = parse_hour(&datetime)?;
    Some(SlotKey { zone, hour })
}

/// Split `line` on commas that are not inside a pair of double quotes.
///
/// A `"` only toggles the quoted state and is dropped from the output.
/// Doubled quotes are not an escape, so a field can never contain a literal
/// `"`.
pub fn split_fields(line: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::with_capacity(FIELD_COUNT);
    let mut field = Vec::with_capacity(line.len());
    let mut in_quotes = false;

    for &b in line {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => out.push(std::mem::take(&mut field)),
            _ => field.push(b),
        }
    }
    out.push(field);
    out
}

/// Strip leading and trailing C-locale whitespace from `field` in place.
///
/// Leaves the buffer untouched when there is nothing to strip.
pub fn trim_in_place(field: &mut Vec<u8>) {
    let start = field.iter().position(|&b| !is_space(b)).unwrap_or(field.len());
    let end = field.iter().rposition(|&b| !is_space(b)).map_or(0, |i| i + 1);

    if start == 0 && end == field.len() {
        return;
    }
    if start >= end {
        field.clear();
        return;
    }

    field.truncate(end);
    field.drain(..start);
}

/// Extract the hour of day from a `YYYY-MM-DD HH:MM:SS`-shaped string.
///
/// Reads the two characters right after the first space. The date part is
/// not validated, so `"a 12bc"` yields `Some(12)`.
pub fn parse_hour(datetime: &[u8]) -> Option<u8> {
    let sp = datetime.iter().position(|&b| b == b' ')?;

    let (hi, lo) = match datetime.get(sp + 1..sp + 3) {
        Some(&[hi, lo]) => (hi, lo),
        _ => return None,
    };
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }

    let hour = (hi - b'0') * 10 + (lo - b'0');
    (hour <= MAX_HOUR).then_some(hour)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whitespace as classified by C `isspace`; unlike `u8::is_ascii_whitespace`
/// this includes vertical tab.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
