//! Command-line timestamp parsing
//!
//! Query arguments use `YYYY-MM-DD-HH:MM:SS`, with a hyphen between date and
//! time so the value survives shell word splitting. Values are read as UTC,
//! the same clock the builder uses for log lines.

use crate::query::error::{QueryError, QueryResult};
use chrono::NaiveDateTime;

/// Format accepted for timestamp arguments
pub const TIME_ARG_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Parse a `YYYY-MM-DD-HH:MM:SS` argument into Unix seconds
pub fn parse_time_arg(input: &str) -> QueryResult<i64> {
    let input = input.trim();

    NaiveDateTime::parse_from_str(input, TIME_ARG_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| QueryError::InvalidTimestamp(input.to_string()))
}

/// Parse both ends of a range, rejecting `end < start`
pub fn parse_time_range(start: &str, end: &str) -> QueryResult<(i64, i64)> {
    let start = parse_time_arg(start)?;
    let end = parse_time_arg(end)?;

    if end < start {
        return Err(QueryError::InvalidTimeRange { start, end });
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_arg() {
        assert_eq!(parse_time_arg("2024-01-01-10:00:00").unwrap(), 1_704_103_200);
        assert_eq!(parse_time_arg("  2024-01-01-10:00:00\n").unwrap(), 1_704_103_200);
        assert_eq!(parse_time_arg("1970-01-01-00:00:00").unwrap(), 0);
    }

    #[test]
    fn test_rejects_log_line_format() {
        let err = parse_time_arg("2024-01-01 10:00:00").unwrap_err();
        assert!(matches!(err, QueryError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_time_arg("").is_err());
        assert!(parse_time_arg("yesterday").is_err());
        assert!(parse_time_arg("2024-02-30-10:00:00").is_err());
        assert!(parse_time_arg("2024-01-01-25:00:00").is_err());
    }

    #[test]
    fn test_parse_time_range() {
        let (start, end) = parse_time_range("2024-01-01-09:00:00", "2024-01-01-11:00:00").unwrap();
        assert_eq!(end - start, 7200);

        // Equal bounds are a valid one-second window
        assert!(parse_time_range("2024-01-01-09:00:00", "2024-01-01-09:00:00").is_ok());

        let err = parse_time_range("2024-01-01-11:00:00", "2024-01-01-09:00:00").unwrap_err();
        assert!(matches!(err, QueryError::InvalidTimeRange { .. }));
    }
}
