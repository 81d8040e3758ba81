//! Shared test fixtures.

use std::io::{self, Cursor, Read};

/// Header row used by the sample trip logs.
pub const HEADER: &str = "id,pickup_zone,x,pickup_datetime,y,z";

/// Four data rows: three well-formed, one with an unparseable datetime.
pub const SAMPLE: &str = "id,pickup_zone,x,pickup_datetime,y,z
1,Downtown,_,2023-01-15 08:12:00,_,_
2,Uptown,_,2023-01-15 08:45:00,_,_
3,Downtown,_,2023-01-15 09:05:00,_,_
4,Downtown,_,not-a-date,_,_
";

/// Yields the given bytes, then fails every further read.
pub struct FailAfter {
    ok: Cursor<Vec<u8>>,
}

impl FailAfter {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            ok: Cursor::new(bytes.to_vec()),
        }
    }
}

impl Read for FailAfter {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match self.ok.read(out)? {
            0 => Err(io::Error::other("device unplugged")),
            n => Ok(n),
        }
    }
}
