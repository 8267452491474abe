//! Index builder
//!
//! Reads a log file once, front to back, and writes one [`IndexRecord`] per
//! line whose prefix looks like `YYYY-MM-DD HH:MM:SS [LEVEL]`. Lines without
//! that prefix are skipped but still advance the byte cursor, so every record
//! points at the exact span its line occupies on disk.

use crate::index::error::{IndexError, IndexResult};
use crate::index::record::{IndexRecord, LevelTag, MAX_LINE};
use chrono::NaiveDate;
use regex::bytes::{Captures, Regex};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Timestamp and level pulled from the front of a log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHeader {
    /// Seconds since the Unix epoch (UTC)
    pub timestamp: i64,
    pub level: LevelTag,
}

/// Outcome of a build pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Records written to the index
    pub written: u64,
    /// Lines that did not carry a parseable prefix
    pub skipped: u64,
    /// Bytes of log consumed
    pub bytes_scanned: u64,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Indexed: {}, Skipped: {}, Scanned: {} bytes",
            self.written, self.skipped, self.bytes_scanned
        )
    }
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})\s*([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})\s*\[((?-u:[^\]])+)\]",
        )
        .expect("log line pattern is valid")
    })
}

fn field<T: FromStr>(caps: &Captures<'_>, idx: usize) -> Option<T> {
    let raw = caps.get(idx)?.as_bytes();
    std::str::from_utf8(raw).ok()?.parse().ok()
}

/// Parse the `YYYY-MM-DD HH:MM:SS [LEVEL]` prefix of a line.
///
/// Returns `None` when any component is missing or out of range. The level
/// is truncated to the record's capacity.
pub fn parse_log_line(line: &[u8]) -> Option<LineHeader> {
    let caps = line_pattern().captures(line)?;

    let date = NaiveDate::from_ymd_opt(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)?;
    let datetime = date.and_hms_opt(field(&caps, 4)?, field(&caps, 5)?, field(&caps, 6)?)?;

    let level = String::from_utf8_lossy(caps.get(7)?.as_bytes());

    Some(LineHeader {
        timestamp: datetime.and_utc().timestamp(),
        level: LevelTag::new(&level),
    })
}

/// Drop everything from the first CR or LF onward
fn strip_terminator(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(line.len());
    &line[..end]
}

/// Read up to and including the next `\n`, but never more than `limit` bytes.
///
/// The rest of an over-long line is left in the reader and comes back on the
/// next call. Returns the number of bytes consumed, zero at EOF.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> std::io::Result<usize> {
    buf.clear();

    while buf.len() < limit {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        let window = &available[..available.len().min(limit - buf.len())];
        let (used, done) = match window.iter().position(|&b| b == b'\n') {
            Some(newline) => (newline + 1, true),
            None => (window.len(), false),
        };

        buf.extend_from_slice(&window[..used]);
        reader.consume(used);

        if done {
            break;
        }
    }

    Ok(buf.len())
}

/// Build an index for `log_path`, replacing whatever is at `index_path`.
///
/// The log is opened before the index is touched, so a missing log leaves any
/// existing index file alone.
pub fn build_index(
    log_path: impl AsRef<Path>,
    index_path: impl AsRef<Path>,
) -> IndexResult<BuildSummary> {
    let log_path = log_path.as_ref();
    let index_path = index_path.as_ref();

    let log = File::open(log_path).map_err(|source| IndexError::OpenLog {
        path: log_path.to_path_buf(),
        source,
    })?;

    let index = File::create(index_path).map_err(|source| IndexError::CreateIndex {
        path: index_path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Building index {:?} from {:?}", index_path, log_path);

    let mut reader = BufReader::new(log);
    let mut writer = BufWriter::new(index);
    let mut summary = BuildSummary::default();

    let mut line = Vec::with_capacity(MAX_LINE);
    let mut line_start: u64 = 0;

    loop {
        let consumed = read_bounded_line(&mut reader, &mut line, MAX_LINE - 1)?;
        if consumed == 0 {
            break;
        }

        match parse_log_line(strip_terminator(&line)) {
            Some(header) => {
                let record = IndexRecord {
                    offset: line_start,
                    timestamp: header.timestamp,
                    level: header.level,
                    line_length: consumed as u64,
                };
                writer.write_all(&record.to_bytes())?;
                summary.written += 1;
            }
            None => {
                tracing::trace!("Skipping unparseable line at offset {}", line_start);
                summary.skipped += 1;
            }
        }

        line_start += consumed as u64;
    }

    writer.flush()?;
    summary.bytes_scanned = line_start;

    tracing::info!("Index built: {}", summary);
    Ok(summary)
}
