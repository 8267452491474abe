//! Query error types
//!
//! Defines all error conditions that can occur while validating query input
//! and running a query.

use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// Opening or scanning the index or log failed
    #[error("Index error: {0}")]
    Index(#[from] crate::index::IndexError),

    /// A timestamp argument did not match `YYYY-MM-DD-HH:MM:SS`
    #[error("Invalid time format: '{0}'. Please use: YYYY-MM-DD-HH:MM:SS")]
    InvalidTimestamp(String),

    /// End of a time range lies before its start
    #[error("Invalid time range: end time {end} is before start time {start}")]
    InvalidTimeRange { start: i64, end: i64 },

    /// The match sink refused output
    #[error("Output error: {0}")]
    Output(#[source] std::io::Error),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
