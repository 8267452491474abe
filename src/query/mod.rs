//! logindex Query Engine
//!
//! Answers two kinds of question against a built index:
//!
//! - **Level**: every line whose bracketed level equals a given tag
//! - **Time**: every line whose timestamp falls in an inclusive range
//!
//! Matches are produced in index order, which is log order, and handed to a
//! caller-supplied sink as they are found.
//!
//! # Examples
//!
//! ```rust,no_run
//! use logindex::query::{parse_time_range, QueryEngine};
//!
//! let engine = QueryEngine::new("app.log", "app.idx");
//!
//! let summary = engine.by_level("ERROR", |m| {
//!     print!("{}", m.text);
//!     Ok(())
//! })?;
//! println!("found {} matching entries", summary.matched);
//!
//! let (start, end) = parse_time_range("2024-01-01-09:00:00", "2024-01-01-11:00:00")?;
//! engine.by_time(start, end, |m| {
//!     print!("{}", m.text);
//!     Ok(())
//! })?;
//! # Ok::<(), logindex::query::QueryError>(())
//! ```

mod error;
mod executor;
mod filter;
mod parser;

pub use error::{QueryError, QueryResult};
pub use executor::{query_by_level, query_by_time, LineMatch, QueryEngine, QuerySummary};
pub use filter::Filter;
pub use parser::{parse_time_arg, parse_time_range, TIME_ARG_FORMAT};
