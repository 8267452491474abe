//! logindex Index Structures
//!
//! The on-disk index is a flat run of fixed-width records, one per parsed log
//! line, in log order:
//!
//! - **record**: Record layout and the bounded level tag
//! - **builder**: One pass over the log producing a fresh index
//! - **scanner**: Lazy record-at-a-time reader
//! - **stats**: Entry count and time span from two direct reads
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Build:
//!   log file → bounded line reads → parse prefix → IndexRecord → index file
//!
//! Read:
//!   index file → IndexScanner → filter → seek(offset) in log → line text
//! ```

mod builder;
mod error;
mod record;
mod scanner;
mod stats;

pub use builder::{build_index, parse_log_line, BuildSummary, LineHeader};
pub use error::{IndexError, IndexResult};
pub use record::{IndexRecord, LevelTag, LEVEL_CAPACITY, LEVEL_MAX_LEN, MAX_LINE, RECORD_SIZE};
pub use scanner::IndexScanner;
pub use stats::{format_timestamp, index_stats, IndexStats};
