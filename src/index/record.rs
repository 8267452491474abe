//! Fixed-width index record format
//!
//! Every parsed log line becomes one record. Records are written back to back
//! with no header or footer, so the record count of an index file is always
//! `file_size / RECORD_SIZE`.
//!
//! Layout (little-endian):
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ offset:      u64        bytes  0..8      │
//! │ timestamp:   i64        bytes  8..16     │
//! │ level:       [u8; 10]   bytes 16..26     │
//! │ reserved:    [u8; 6]    bytes 26..32     │
//! │ line_length: u64        bytes 32..40     │
//! └──────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

/// Longest line (including terminator) a single read will consume, plus one
pub const MAX_LINE: usize = 1024;

/// Width of the level field on disk
pub const LEVEL_CAPACITY: usize = 10;

/// Longest level tag that is stored; the field always keeps one NUL
pub const LEVEL_MAX_LEN: usize = LEVEL_CAPACITY - 1;

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 40;

const LEVEL_START: usize = 16;
const LEVEL_END: usize = LEVEL_START + LEVEL_CAPACITY;

/// Severity tag bounded to [`LEVEL_MAX_LEN`] bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct LevelTag(String);

impl LevelTag {
    /// Build a tag, truncating at the last character boundary that fits.
    ///
    /// Anything after an embedded NUL is dropped since the on-disk field is
    /// NUL terminated.
    pub fn new(level: &str) -> Self {
        let level = level.split('\0').next().unwrap_or_default();

        let mut end = level.len().min(LEVEL_MAX_LEN);
        while !level.is_char_boundary(end) {
            end -= 1;
        }

        Self(level[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn to_field(&self) -> [u8; LEVEL_CAPACITY] {
        let mut field = [0u8; LEVEL_CAPACITY];
        let bytes = self.0.as_bytes();
        field[..bytes.len()].copy_from_slice(bytes);
        field
    }

    fn from_field(field: &[u8]) -> Self {
        let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Self(String::from_utf8_lossy(&field[..len]).into_owned())
    }
}

impl fmt::Display for LevelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LevelTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LevelTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One indexed log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    /// Byte offset of the line's first byte in the log file
    pub offset: u64,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// Severity tag from the bracketed level token
    pub level: LevelTag,
    /// Bytes occupied on disk, terminator included
    pub line_length: u64,
}

impl IndexRecord {
    pub fn new(offset: u64, timestamp: i64, level: &str, line_length: u64) -> Self {
        Self {
            offset,
            timestamp,
            level: LevelTag::new(level),
            line_length,
        }
    }

    /// Serialize record to its fixed-width block
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];

        buf[0..8].copy_from_slice(&self.offset.to_le_bytes());
        buf[8..16].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[LEVEL_START..LEVEL_END].copy_from_slice(&self.level.to_field());
        // bytes 26-31 reserved
        buf[32..40].copy_from_slice(&self.line_length.to_le_bytes());

        buf
    }

    /// Parse a record from a full-width block
    ///
    /// Field contents are not validated.
    pub fn from_bytes(buf: &[u8; RECORD_SIZE]) -> Self {
        let offset = u64::from_le_bytes([
            buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
        ]);
        let timestamp = i64::from_le_bytes([
            buf[8], buf[9], buf[10], buf[11], buf[12], buf[13], buf[14], buf[15],
        ]);
        let level = LevelTag::from_field(&buf[LEVEL_START..LEVEL_END]);
        let line_length = u64::from_le_bytes([
            buf[32], buf[33], buf[34], buf[35], buf[36], buf[37], buf[38], buf[39],
        ]);

        Self {
            offset,
            timestamp,
            level,
            line_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip() {
        let record = IndexRecord::new(4096, 1_704_103_200, "ERROR", 47);

        let bytes = record.to_bytes();
        assert_eq!(bytes.len(), RECORD_SIZE);

        let decoded = IndexRecord::from_bytes(&bytes);
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_roundtrip_at_field_limits() {
        let record = IndexRecord::new(u64::MAX - 1, -1, "ABCDEFGHI", (MAX_LINE - 1) as u64);
        assert_eq!(IndexRecord::from_bytes(&record.to_bytes()), record);
    }

    #[test]
    fn test_decode_saturated_span() {
        // offset + line_length does not fit in u64; decoding must not care
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..8].copy_from_slice(&u64::MAX.to_le_bytes());
        bytes[32..40].copy_from_slice(&u64::MAX.to_le_bytes());

        let decoded = IndexRecord::from_bytes(&bytes);
        assert_eq!(decoded.offset, u64::MAX);
        assert_eq!(decoded.line_length, u64::MAX);
        assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn test_level_padding_is_deterministic() {
        let short = IndexRecord::new(0, 0, "INFO", 1).to_bytes();
        assert_eq!(&short[16..20], b"INFO");
        assert!(short[20..32].iter().all(|&b| b == 0));

        // Same input, same bytes
        assert_eq!(short, IndexRecord::new(0, 0, "INFO", 1).to_bytes());
    }

    #[test]
    fn test_level_truncation() {
        assert_eq!(LevelTag::new("VERYLONGLEVEL").as_str(), "VERYLONGL");
        assert_eq!(LevelTag::new("WARN").as_str(), "WARN");

        // 'é' is two bytes and would straddle the limit
        assert_eq!(LevelTag::new("ABCDEFGHé").as_str(), "ABCDEFGH");

        assert_eq!(LevelTag::new("ER\0ROR").as_str(), "ER");
    }

    #[test]
    fn test_level_field_without_nul() {
        // A block written by another tool may fill the whole field
        let mut bytes = IndexRecord::new(0, 0, "", 0).to_bytes();
        bytes[16..26].copy_from_slice(b"0123456789");

        let decoded = IndexRecord::from_bytes(&bytes);
        assert_eq!(decoded.level.as_str(), "0123456789");
    }

    #[test]
    fn test_level_comparisons() {
        let level = LevelTag::new("ERROR");
        assert!(level == "ERROR");
        assert!(level != "error");
        assert_eq!(level.to_string(), "ERROR");
    }
}
