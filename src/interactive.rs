//! Interactive query session
//!
//! [`Session`] is a small state machine that turns input lines into
//! [`Command`]s; [`run_session`] drives it over any reader/writer pair.
//!
//! ```text
//!            "time"               valid start
//!   Idle ───────────► AwaitingStart ──────────► AwaitingEnd
//!    ▲                     │                        │
//!    └──── invalid ────────┘◄── invalid / range ────┘
//! ```

use crate::index::index_stats;
use crate::query::{parse_time_arg, Filter, QueryEngine, QueryError};
use crate::report::Printer;
use std::io::{BufRead, Write};

/// Where the session is in its prompt sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingStart,
    AwaitingEnd {
        start: i64,
    },
}

/// What the driver should do after an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to run; show the next prompt
    Continue,
    Quit,
    Stats,
    AllLevels,
    Level(String),
    TimeRange { start: i64, end: i64 },
    /// Input was rejected; the message explains why
    Invalid(String),
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn prompt(&self) -> &'static str {
        match self.state {
            SessionState::Idle => "Enter log level or command: ",
            SessionState::AwaitingStart => "  Enter start time (YYYY-MM-DD-HH:MM:SS): ",
            SessionState::AwaitingEnd { .. } => "  Enter end time   (YYYY-MM-DD-HH:MM:SS): ",
        }
    }

    /// Consume one line of input
    pub fn feed(&mut self, input: &str) -> Command {
        let input = input.trim();

        match self.state {
            SessionState::Idle => {
                let input = input.to_uppercase();
                match input.as_str() {
                    "" => Command::Continue,
                    "QUIT" | "EXIT" => Command::Quit,
                    "STATS" => Command::Stats,
                    "ALL" => Command::AllLevels,
                    "TIME" => {
                        self.state = SessionState::AwaitingStart;
                        Command::Continue
                    }
                    _ => Command::Level(input),
                }
            }
            SessionState::AwaitingStart => match parse_time_arg(input) {
                Ok(start) => {
                    self.state = SessionState::AwaitingEnd { start };
                    Command::Continue
                }
                Err(e) => {
                    self.state = SessionState::Idle;
                    Command::Invalid(format!("Invalid start time. {}", e))
                }
            },
            SessionState::AwaitingEnd { start } => {
                self.state = SessionState::Idle;
                match parse_time_arg(input) {
                    Ok(end) if end < start => {
                        Command::Invalid(QueryError::InvalidTimeRange { start, end }.to_string())
                    }
                    Ok(end) => Command::TimeRange { start, end },
                    Err(e) => Command::Invalid(format!("Invalid end time. {}", e)),
                }
            }
        }
    }
}

fn banner<W: Write>(out: &mut W, levels: &[String]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "======== Log Query Mode ========")?;
    writeln!(out, "Available log levels: {}", levels.join(", "))?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  - Enter a log level to search (e.g., ERROR, INFO)")?;
    writeln!(out, "  - Type 'stats' to see index statistics")?;
    writeln!(out, "  - Type 'all' to see all log levels")?;
    writeln!(out, "  - Type 'time' to search by time range")?;
    writeln!(out, "  - Type 'quit' to exit")?;
    writeln!(out, "=====================================")?;
    writeln!(out)
}

/// Run a session until `quit`/`exit` or end of input.
///
/// Operation failures are reported inline and the session continues; only a
/// failure to write to `printer` ends it early.
pub fn run_session<R, W>(
    engine: &QueryEngine,
    levels: &[String],
    mut input: R,
    printer: &mut Printer<W>,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new();
    let mut line = String::new();

    banner(printer.writer(), levels)?;

    loop {
        write!(printer.writer(), "{}", session.prompt())?;
        printer.writer().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("Input closed in state {:?}", session.state());
            break;
        }

        match session.feed(&line) {
            Command::Continue => continue,
            Command::Quit => {
                writeln!(printer.writer(), "Exiting...")?;
                break;
            }
            Command::Invalid(message) => {
                writeln!(printer.writer(), "Error: {}", message)?;
            }
            Command::Stats => match index_stats(engine.index_path()) {
                Ok(stats) => printer.stats(&stats)?,
                Err(e) => writeln!(printer.writer(), "Error: {}", e)?,
            },
            Command::Level(level) => {
                if let Some(summary) = run_query(printer, engine, &Filter::Level(level.clone()))? {
                    if summary.matched == 0 {
                        writeln!(printer.writer(), "No logs found for level: {}", level)?;
                    }
                }
            }
            Command::AllLevels => {
                writeln!(printer.writer(), "\nShowing all log levels:")?;
                for level in levels {
                    writeln!(printer.writer(), "\n--- {} logs ---", level)?;
                    let filter = Filter::level(level.as_str());
                    if let Some(summary) = run_query(printer, engine, &filter)? {
                        if summary.matched == 0 {
                            writeln!(printer.writer(), "(No {} logs found)", level)?;
                        }
                    }
                }
            }
            Command::TimeRange { start, end } => {
                run_query(printer, engine, &Filter::time_range(start, end))?;
            }
        }

        writeln!(printer.writer())?;
    }

    Ok(())
}

/// Run one query, reporting non-output failures inline
fn run_query<W: Write>(
    printer: &mut Printer<W>,
    engine: &QueryEngine,
    filter: &Filter,
) -> std::io::Result<Option<crate::query::QuerySummary>> {
    match printer.query(engine, filter) {
        Ok(summary) => Ok(Some(summary)),
        Err(QueryError::Output(e)) => Err(e),
        Err(e) => {
            tracing::error!("Query for {} failed: {}", filter, e);
            writeln!(printer.writer(), "Error: {}", e)?;
            Ok(None)
        }
    }
}
