//! Index error types
//!
//! Defines the errors that can occur while building or reading an index.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the index layer
#[derive(Error, Debug)]
pub enum IndexError {
    /// The log file could not be opened for reading
    #[error("Failed to open log file {path:?}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index file could not be opened for reading
    #[error("Failed to open index file {path:?}: {source}")]
    OpenIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index file could not be created or truncated
    #[error("Failed to create index file {path:?}: {source}")]
    CreateIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O operation failed mid-operation
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;
