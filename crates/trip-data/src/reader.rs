//! Trip-log source reading.
//!
//! Opens a CSV file and streams its lines one at a time, skipping the header.
//! Lines are split on `\n` only and handed out as raw bytes, so input that is
//! not UTF-8 neither aborts the scan nor loses information.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use trip_core::error::{Result, TripError};

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` for buffered reading.
pub fn open_source(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TripError::SourceOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Read one line into `buf` and return its bytes without the trailing `\n`.
///
/// Returns `Ok(None)` at end of input. A final line without a terminator is
/// still returned.
pub fn read_line<'a, R: BufRead>(
    reader: &mut R,
    buf: &'a mut Vec<u8>,
) -> io::Result<Option<&'a [u8]>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(buf.as_slice()))
}

/// Discard the first line of `reader` as a header, then hand every
/// following line (empty ones included) to `on_line`.
///
/// Returns `Ok(false)` when the source had no header line at all. A read
/// error stops the scan; lines already handed out stay handed out.
pub fn scan_data_lines<R, F>(reader: &mut R, mut on_line: F) -> io::Result<bool>
where
    R: BufRead,
    F: FnMut(&[u8]),
{
    let mut buf = Vec::new();
    if read_line(reader, &mut buf)?.is_none() {
        return Ok(false);
    }

    while let Some(line) = read_line(reader, &mut buf)? {
        on_line(line);
    }
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
