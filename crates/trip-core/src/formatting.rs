use crate::models::{SlotCount, ZoneCount};

const NO_DATA: &str = "(no data)";

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use trip_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format an hour of day as `HH:00`.
///
/// # Examples
///
/// ```
/// use trip_core::formatting::format_hour;
///
/// assert_eq!(format_hour(8), "08:00");
/// assert_eq!(format_hour(23), "23:00");
/// ```
pub fn format_hour(hour: u8) -> String {
    format!("{:02}:00", hour)
}

/// Render a zone ranking as an aligned plain-text table.
///
/// An empty ranking renders a single `(no data)` line.
pub fn render_zone_table(rows: &[ZoneCount]) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_DATA);
    }

    let body: Vec<[String; 3]> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| [(i + 1).to_string(), r.zone.clone(), format_count(r.count)])
        .collect();

    render_table(["#", "Zone", "Pickups"], &body)
}

/// Render a busy-slot ranking as an aligned plain-text table.
///
/// An empty ranking renders a single `(no data)` line.
pub fn render_slot_table(rows: &[SlotCount]) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_DATA);
    }

    let body: Vec<[String; 4]> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                r.zone.clone(),
                format_hour(r.hour),
                format_count(r.count),
            ]
        })
        .collect();

    render_table(["#", "Zone", "Hour", "Pickups"], &body)
}

// ── Internal helpers ───────────────────────────────────────────────────────────

/// Lay out `header` and `body` in columns. The first and last columns are
/// right-aligned (rank and count), the rest left-aligned.
fn render_table<const N: usize>(header: [&str; N], body: &[[String; N]]) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in body {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in body {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<const N: usize>(out: &mut String, cells: &[String; N], widths: &[usize; N]) {
    let last = N - 1;
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 || i == last {
                format!("{:>w$}", cell, w = w)
            } else {
                format!("{:<w$}", cell, w = w)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Insert commas every three digits from the right.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
