//! # logindex
//!
//! Offset index for line-oriented log files. A single build pass records where
//! every `YYYY-MM-DD HH:MM:SS [LEVEL] ...` line lives; queries by level or by
//! time range then scan the compact index and seek straight to the matching
//! lines instead of rereading the whole log.
//!
//! ## Features
//!
//! - **Fixed-width records**: 40-byte little-endian entries, no header
//! - **Single pass build**: unparseable lines skipped and counted
//! - **Seek-based queries**: only matching lines are read back from the log
//! - **Cheap stats**: entry count and time span without a scan
//!
//! ## Modules
//!
//! - [`index`]: Record format, builder, scanner and stats
//! - [`query`]: Filters and the query engine
//! - [`interactive`]: Prompt-driven query session
//! - [`report`]: Text and JSON result printing
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logindex::{build_index, index_stats, QueryEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = build_index("app.log", "app.idx")?;
//!     println!("index built with {} entries", summary.written);
//!
//!     let engine = QueryEngine::new("app.log", "app.idx");
//!     let found = engine.by_level("ERROR", |m| {
//!         print!("{}", m.text);
//!         Ok(())
//!     })?;
//!     println!("found {} matching entries", found.matched);
//!
//!     println!("{}", index_stats("app.idx")?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod index;
pub mod interactive;
pub mod query;
pub mod report;

// Re-export top-level types for convenience
pub use index::{
    build_index, index_stats, parse_log_line, BuildSummary, IndexError, IndexRecord,
    IndexResult, IndexScanner, IndexStats, LevelTag, MAX_LINE, RECORD_SIZE,
};

pub use query::{
    parse_time_arg, parse_time_range, query_by_level, query_by_time, Filter, LineMatch,
    QueryEngine, QueryError, QueryResult, QuerySummary,
};

pub use interactive::{run_session, Command, Session, SessionState};

pub use report::Printer;

pub use config::{Config, ConfigError, LoggingConfig, OutputConfig, OutputFormat, QueryConfig};
