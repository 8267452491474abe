//! Record filters
//!
//! A query is a single predicate over index records. Level matching is exact
//! and case-sensitive; callers that want case folding normalize first.

use crate::index::IndexRecord;
use serde::Serialize;
use std::fmt;

/// Predicate applied to each scanned record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Filter {
    /// Level field equals this string
    Level(String),
    /// `start <= timestamp <= end`
    TimeRange { start: i64, end: i64 },
}

impl Filter {
    pub fn level(level: impl Into<String>) -> Self {
        Filter::Level(level.into())
    }

    /// Inclusive range; ordering of `start` and `end` is not checked here
    pub fn time_range(start: i64, end: i64) -> Self {
        Filter::TimeRange { start, end }
    }

    pub fn matches(&self, record: &IndexRecord) -> bool {
        match self {
            Filter::Level(level) => record.level == level.as_str(),
            Filter::TimeRange { start, end } => {
                *start <= record.timestamp && record.timestamp <= *end
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::index::format_timestamp;

        match self {
            Filter::Level(level) => write!(f, "level {}", level),
            Filter::TimeRange { start, end } => write!(
                f,
                "time {} to {}",
                format_timestamp(*start),
                format_timestamp(*end)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_is_case_sensitive() {
        let record = IndexRecord::new(0, 0, "ERROR", 10);

        assert!(Filter::level("ERROR").matches(&record));
        assert!(!Filter::level("error").matches(&record));
        assert!(!Filter::level("ERR").matches(&record));
    }

    #[test]
    fn test_time_range_inclusive() {
        let filter = Filter::time_range(100, 200);

        assert!(filter.matches(&IndexRecord::new(0, 100, "INFO", 1)));
        assert!(filter.matches(&IndexRecord::new(0, 150, "INFO", 1)));
        assert!(filter.matches(&IndexRecord::new(0, 200, "INFO", 1)));
        assert!(!filter.matches(&IndexRecord::new(0, 99, "INFO", 1)));
        assert!(!filter.matches(&IndexRecord::new(0, 201, "INFO", 1)));
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let filter = Filter::time_range(200, 100);
        assert!(!filter.matches(&IndexRecord::new(0, 150, "INFO", 1)));
    }
}
