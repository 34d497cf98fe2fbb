//! `Range` header parsing.
//!
//! Only the single-range form `bytes=START-END` is accepted, with `END`
//! optional (meaning "to end of file"). Suffix ranges (`bytes=-500`) and
//! multi-range requests (`bytes=0-99,200-299`) are rejected rather than
//! served, as are ranges that extend past the end of the file. There is no
//! clamping.

use rr_core::{Error, Result};

/// A validated, inclusive byte interval: `start <= end < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
    total: u64,
}

impl ByteRange {
    /// Returns `None` unless `start <= end < total`.
    pub fn new(start: u64, end: u64, total: u64) -> Option<Self> {
        (start <= end && end < total).then_some(Self { start, end, total })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of bytes in the interval.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` response header.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Parse an optional `Range` header against a file of `file_size` bytes.
///
/// `Ok(None)` means no header was sent and the whole file should be served.
pub fn parse_range(header: Option<&str>, file_size: u64) -> Result<Option<ByteRange>> {
    let Some(value) = header else {
        return Ok(None);
    };
    let unsatisfiable = || Error::range_not_satisfiable(value, file_size);

    let spec = strip_bytes_unit(value.trim()).ok_or_else(unsatisfiable)?;
    if spec.contains(',') {
        return Err(unsatisfiable());
    }

    let (start_str, end_str) = spec.split_once('-').ok_or_else(unsatisfiable)?;
    let start = parse_position(start_str).ok_or_else(unsatisfiable)?;
    let end = if end_str.is_empty() {
        file_size.checked_sub(1).ok_or_else(unsatisfiable)?
    } else {
        parse_position(end_str).ok_or_else(unsatisfiable)?
    };

    ByteRange::new(start, end, file_size)
        .map(Some)
        .ok_or_else(unsatisfiable)
}

/// Strip a case-insensitive `bytes=` prefix.
fn strip_bytes_unit(value: &str) -> Option<&str> {
    let (unit, spec) = value.split_once('=')?;
    unit.trim().eq_ignore_ascii_case("bytes").then_some(spec)
}

/// Decimal digits only; `u64::from_str` alone would accept a leading `+`.
fn parse_position(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
