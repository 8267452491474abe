//! Sequential reader over an index file
//!
//! Pulls one fixed-width block per `next()`. A trailing block shorter than
//! [`RECORD_SIZE`] ends the sequence quietly; it is not treated as corruption.

use crate::index::error::{IndexError, IndexResult};
use crate::index::record::{IndexRecord, RECORD_SIZE};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Lazy iterator over the records of an index
///
/// Each pull issues reads for exactly one record, with no read-ahead. Reopen
/// the file to start over.
pub struct IndexScanner<R = File> {
    reader: R,
    records_read: u64,
    finished: bool,
}

impl IndexScanner<File> {
    /// Open an index file for scanning
    pub fn open(path: impl AsRef<Path>) -> IndexResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IndexError::OpenIndex {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<R: Read> IndexScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of full records yielded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Fill `buf` as far as the reader allows; returns bytes read
    fn read_block(&mut self, buf: &mut [u8; RECORD_SIZE]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for IndexScanner<R> {
    type Item = IndexResult<IndexRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut buf = [0u8; RECORD_SIZE];
        match self.read_block(&mut buf) {
            Ok(RECORD_SIZE) => {
                self.records_read += 1;
                Some(Ok(IndexRecord::from_bytes(&buf)))
            }
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(partial) => {
                tracing::debug!(
                    "Ignoring {} trailing bytes after record {}",
                    partial,
                    self.records_read
                );
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn encode(records: &[IndexRecord]) -> Vec<u8> {
        records.iter().flat_map(|r| r.to_bytes()).collect()
    }

    #[test]
    fn test_scan_in_file_order() {
        let records = vec![
            IndexRecord::new(0, 100, "INFO", 10),
            IndexRecord::new(10, 200, "ERROR", 12),
            IndexRecord::new(22, 150, "WARN", 8),
        ];

        let mut scanner = IndexScanner::new(Cursor::new(encode(&records)));
        let scanned: Vec<IndexRecord> = scanner.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(scanned, records);
        assert_eq!(scanner.records_read(), 3);
    }

    #[test]
    fn test_empty_index() {
        let mut scanner = IndexScanner::new(Cursor::new(Vec::new()));
        assert!(scanner.next().is_none());
        assert_eq!(scanner.records_read(), 0);
    }

    #[test]
    fn test_trailing_partial_block_ends_scan() {
        let mut bytes = encode(&[
            IndexRecord::new(0, 100, "INFO", 10),
            IndexRecord::new(10, 200, "INFO", 10),
        ]);
        bytes.truncate(RECORD_SIZE + RECORD_SIZE / 2);

        let scanned: Vec<_> = IndexScanner::new(Cursor::new(bytes)).collect();
        assert_eq!(scanned.len(), 1);
        assert!(scanned[0].is_ok());
    }

    #[test]
    fn test_reopen_restarts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.idx");
        std::fs::write(&path, encode(&[IndexRecord::new(0, 1, "INFO", 5)])).unwrap();

        assert_eq!(IndexScanner::open(&path).unwrap().count(), 1);
        assert_eq!(IndexScanner::open(&path).unwrap().count(), 1);
    }

    #[test]
    fn test_open_missing_index() {
        let dir = tempdir().unwrap();
        let result = IndexScanner::open(dir.path().join("missing.idx"));
        assert!(matches!(result, Err(IndexError::OpenIndex { .. })));
    }
}
