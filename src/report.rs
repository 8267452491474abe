//! Result printing
//!
//! Shared by the one-shot subcommands and the interactive session. Text
//! output echoes matched lines verbatim between separator rules; JSON output
//! writes one object per line so it can be piped into other tools.

use crate::config::OutputFormat;
use crate::index::{BuildSummary, IndexStats};
use crate::query::{Filter, LineMatch, QueryEngine, QueryError, QueryResult, QuerySummary};
use std::io::Write;

const RULE: &str = "------------------------------------------------------------";

/// Writes results in the configured format
pub struct Printer<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Raw access for prompts and status messages
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run `filter` on `engine`, printing each match as it arrives
    pub fn query(&mut self, engine: &QueryEngine, filter: &Filter) -> QueryResult<QuerySummary> {
        match self.format {
            OutputFormat::Text => self.query_text(engine, filter),
            OutputFormat::Json => self.query_json(engine, filter),
        }
    }

    fn query_text(&mut self, engine: &QueryEngine, filter: &Filter) -> QueryResult<QuerySummary> {
        let out = &mut self.out;
        writeln!(out, "Querying logs with {}", filter).map_err(QueryError::Output)?;
        writeln!(out, "{}", RULE).map_err(QueryError::Output)?;

        let mut open_line = false;
        let summary = engine.run(filter, |m: &LineMatch| {
            out.write_all(m.text.as_bytes())?;
            open_line = !m.text.ends_with('\n');
            Ok(())
        })?;

        if open_line {
            writeln!(out).map_err(QueryError::Output)?;
        }
        writeln!(out, "{}", RULE).map_err(QueryError::Output)?;
        writeln!(out, "found {} matching entries", summary.matched).map_err(QueryError::Output)?;
        out.flush().map_err(QueryError::Output)?;

        Ok(summary)
    }

    fn query_json(&mut self, engine: &QueryEngine, filter: &Filter) -> QueryResult<QuerySummary> {
        let out = &mut self.out;

        let summary = engine.run(filter, |m: &LineMatch| {
            serde_json::to_writer(&mut *out, m)?;
            writeln!(out)
        })?;

        let footer = serde_json::json!({
            "filter": filter,
            "summary": summary,
        });
        serde_json::to_writer(&mut *out, &footer)
            .map_err(|e| QueryError::Output(e.into()))?;
        writeln!(out).map_err(QueryError::Output)?;
        out.flush().map_err(QueryError::Output)?;

        Ok(summary)
    }

    pub fn stats(&mut self, stats: &IndexStats) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", stats)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, stats)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    pub fn build(&mut self, summary: &BuildSummary) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "index built with {} entries", summary.written)?;
                if summary.skipped > 0 {
                    writeln!(self.out, "skipped {} unparseable lines", summary.skipped)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, summary)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use tempfile::tempdir;

    fn engine(dir: &tempfile::TempDir, log: &str) -> QueryEngine {
        let log_path = dir.path().join("app.log");
        let index_path = dir.path().join("app.idx");
        std::fs::write(&log_path, log).unwrap();
        build_index(&log_path, &index_path).unwrap();
        QueryEngine::new(log_path, index_path)
    }

    #[test]
    fn test_text_query_output() {
        let dir = tempdir().unwrap();
        let engine = engine(
            &dir,
            "2024-01-01 10:00:00 [INFO] up\n2024-01-01 10:05:00 [ERROR] down",
        );

        let mut printer = Printer::new(Vec::new(), OutputFormat::Text);
        let summary = printer.query(&engine, &Filter::level("ERROR")).unwrap();
        assert_eq!(summary.matched, 1);

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let expected = format!(
            "Querying logs with level ERROR\n{RULE}\n2024-01-01 10:05:00 [ERROR] down\n{RULE}\nfound 1 matching entries\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_query_output() {
        let dir = tempdir().unwrap();
        let engine = engine(&dir, "2024-01-01 10:00:00 [INFO] up\n");

        let mut printer = Printer::new(Vec::new(), OutputFormat::Json);
        printer.query(&engine, &Filter::time_range(0, i64::MAX)).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["record"]["level"], "INFO");
        assert_eq!(lines[0]["record"]["offset"], 0);
        assert_eq!(lines[0]["text"], "2024-01-01 10:00:00 [INFO] up\n");
        assert_eq!(lines[1]["filter"]["type"], "time_range");
        assert_eq!(lines[1]["summary"]["matched"], 1);
    }

    #[test]
    fn test_build_and_stats_output() {
        let mut printer = Printer::new(Vec::new(), OutputFormat::Text);
        printer
            .build(&BuildSummary {
                written: 2,
                skipped: 1,
                bytes_scanned: 100,
            })
            .unwrap();
        printer.stats(&IndexStats::default()).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.starts_with("index built with 2 entries\nskipped 1 unparseable lines\n"));
        assert!(text.contains("Total Entries: 0"));
        assert!(text.contains("empty index!"));
    }
}
