//! Query Executor
//!
//! Runs a [`Filter`] over an index and recovers the text of every match from
//! the log file.
//!
//! # Execution Pipeline
//!
//! ```text
//! IndexScanner → Filter → seek(record.offset) → bounded read → sink
//! ```
//!
//! Both files stay open for the whole query: the index for sequential reads,
//! the log for seek-then-read. A record whose line cannot be re-read is logged
//! and skipped without aborting the scan.

use crate::index::{IndexError, IndexRecord, IndexScanner, MAX_LINE};
use crate::query::error::{QueryError, QueryResult};
use crate::query::filter::Filter;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A matched record and the text read back from the log
///
/// `text` covers the record's stored span, so it usually ends with the
/// line's original terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub record: IndexRecord,
    pub text: String,
}

/// Counters for one query run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuerySummary {
    /// Matches handed to the sink
    pub matched: u64,
    /// Matching records whose line could not be read back
    pub skipped: u64,
    /// Records scanned from the index
    pub scanned: u64,
}

/// Executes filters against one log/index pair
#[derive(Debug, Clone)]
pub struct QueryEngine {
    log_path: PathBuf,
    index_path: PathBuf,
}

impl QueryEngine {
    pub fn new(log_path: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            index_path: index_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Emit every line whose level equals `level` exactly
    pub fn by_level<F>(&self, level: &str, sink: F) -> QueryResult<QuerySummary>
    where
        F: FnMut(&LineMatch) -> std::io::Result<()>,
    {
        self.run(&Filter::level(level), sink)
    }

    /// Emit every line with `start <= timestamp <= end`
    pub fn by_time<F>(&self, start: i64, end: i64, sink: F) -> QueryResult<QuerySummary>
    where
        F: FnMut(&LineMatch) -> std::io::Result<()>,
    {
        self.run(&Filter::time_range(start, end), sink)
    }

    /// Scan the index and feed matches to `sink` in index order
    pub fn run<F>(&self, filter: &Filter, mut sink: F) -> QueryResult<QuerySummary>
    where
        F: FnMut(&LineMatch) -> std::io::Result<()>,
    {
        let mut scanner = IndexScanner::open(&self.index_path)?;
        let mut log = File::open(&self.log_path).map_err(|source| IndexError::OpenLog {
            path: self.log_path.clone(),
            source,
        })?;

        tracing::debug!("Querying {:?} for {}", self.index_path, filter);

        let mut summary = QuerySummary::default();
        let mut buf = Vec::with_capacity(MAX_LINE);

        for record in scanner.by_ref() {
            let record = record?;
            if !filter.matches(&record) {
                continue;
            }

            match read_span(&mut log, &record, &mut buf) {
                Ok(0) => {
                    tracing::warn!("Empty read at offset {}, skipping", record.offset);
                    summary.skipped += 1;
                }
                Ok(_) => {
                    let found = LineMatch {
                        text: String::from_utf8_lossy(&buf).into_owned(),
                        record,
                    };
                    sink(&found).map_err(QueryError::Output)?;
                    summary.matched += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to read line at offset {}: {}", record.offset, e);
                    summary.skipped += 1;
                }
            }
        }

        summary.scanned = scanner.records_read();
        tracing::debug!(
            "Query for {} matched {} of {} records ({} skipped)",
            filter,
            summary.matched,
            summary.scanned,
            summary.skipped
        );

        Ok(summary)
    }
}

/// Read back a record's line, capped below [`MAX_LINE`]
fn read_span(log: &mut File, record: &IndexRecord, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    buf.clear();
    log.seek(SeekFrom::Start(record.offset))?;

    let limit = record.line_length.min(MAX_LINE as u64 - 1);
    log.by_ref().take(limit).read_to_end(buf)
}

/// Emit every line of `log_path` whose indexed level equals `level`
pub fn query_by_level<F>(
    log_path: impl AsRef<Path>,
    index_path: impl AsRef<Path>,
    level: &str,
    sink: F,
) -> QueryResult<QuerySummary>
where
    F: FnMut(&LineMatch) -> std::io::Result<()>,
{
    QueryEngine::new(log_path.as_ref(), index_path.as_ref()).by_level(level, sink)
}

/// Emit every line of `log_path` indexed within `[start, end]`
pub fn query_by_time<F>(
    log_path: impl AsRef<Path>,
    index_path: impl AsRef<Path>,
    start: i64,
    end: i64,
    sink: F,
) -> QueryResult<QuerySummary>
where
    F: FnMut(&LineMatch) -> std::io::Result<()>,
{
    QueryEngine::new(log_path.as_ref(), index_path.as_ref()).by_time(start, end, sink)
}
