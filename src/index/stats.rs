//! Index statistics
//!
//! Entry count comes straight from the file size. The first and last records
//! are read directly to get the indexed time span; nothing else is scanned.

use crate::index::error::{IndexError, IndexResult};
use crate::index::record::{IndexRecord, RECORD_SIZE};
use chrono::DateTime;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Summary of an index file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Complete records in the file
    pub entry_count: u64,
    /// Index file size in bytes
    pub file_size: u64,
    /// Width of one record
    pub record_size: usize,
    /// Timestamp of the first record, if any
    pub first_timestamp: Option<i64>,
    /// Timestamp of the last complete record, if any
    pub last_timestamp: Option<i64>,
}

impl IndexStats {
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Render a Unix timestamp as `Mon Jan  1 10:00:00 2024` (UTC)
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "==== Index Stats ====")?;
        writeln!(f, "Total Entries: {}", self.entry_count)?;
        writeln!(f, "Index File Size: {} bytes", self.file_size)?;
        write!(f, "Each Entry Size: {} bytes", self.record_size)?;

        if self.is_empty() {
            return write!(f, "\nempty index!");
        }
        if let Some(first) = self.first_timestamp {
            write!(f, "\nFirst Log: {}", format_timestamp(first))?;
        }
        if let Some(last) = self.last_timestamp {
            write!(f, "\nLast Log: {}", format_timestamp(last))?;
        }
        Ok(())
    }
}

/// Read the record starting at `position`, or `None` on a short read
fn read_record_at(file: &mut File, position: u64) -> IndexResult<Option<IndexRecord>> {
    file.seek(SeekFrom::Start(position))?;

    let mut buf = [0u8; RECORD_SIZE];
    match file.read_exact(&mut buf) {
        Ok(()) => Ok(Some(IndexRecord::from_bytes(&buf))),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Collect statistics for an index file
pub fn index_stats(index_path: impl AsRef<Path>) -> IndexResult<IndexStats> {
    let index_path = index_path.as_ref();
    let mut file = File::open(index_path).map_err(|source| IndexError::OpenIndex {
        path: index_path.to_path_buf(),
        source,
    })?;

    let file_size = file.seek(SeekFrom::End(0))?;
    let entry_count = file_size / RECORD_SIZE as u64;

    let mut stats = IndexStats {
        entry_count,
        file_size,
        record_size: RECORD_SIZE,
        ..Default::default()
    };

    if entry_count > 0 {
        stats.first_timestamp = read_record_at(&mut file, 0)?.map(|r| r.timestamp);
        stats.last_timestamp = read_record_at(&mut file, file_size - RECORD_SIZE as u64)?
            .map(|r| r.timestamp);
    }

    tracing::debug!(
        "Index {:?}: {} entries, {} bytes",
        index_path,
        entry_count,
        file_size
    );

    Ok(stats)
}
