//! logindex CLI
//!
//! Command-line interface for building and querying log indexes:
//! - Build an index from a log file
//! - Query by level or time range, once or interactively
//! - Show index statistics
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use logindex::config::{generate_default_config, Config, LoggingConfig, OutputFormat};
use logindex::{
    build_index, index_stats, parse_time_range, run_session, Filter, Printer, QueryEngine,
    QueryError,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "logindex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Index a log file by level and timestamp for fast lookups")]
#[command(
    long_about = "logindex records the byte offset of every `YYYY-MM-DD HH:MM:SS [LEVEL]` line in a log file.\nQueries scan the small index and seek straight to matching lines."
)]
#[command(after_help = "Time format for query-time: \"YYYY-MM-DD-HH:MM:SS\" (UTC)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build (or rebuild) the index for a log file
    Build {
        logfile: PathBuf,
        indexfile: PathBuf,
    },

    /// Interactive query mode
    Query {
        logfile: PathBuf,
        indexfile: PathBuf,
    },

    /// Print every line with exactly this level
    QueryLevel {
        logfile: PathBuf,
        indexfile: PathBuf,
        /// Level tag, matched case-sensitively
        level: String,
    },

    /// Print every line between two timestamps (inclusive)
    QueryTime {
        logfile: PathBuf,
        indexfile: PathBuf,
        /// Start time, YYYY-MM-DD-HH:MM:SS
        start: String,
        /// End time, YYYY-MM-DD-HH:MM:SS
        end: String,
    },

    /// Show index statistics
    Stats { indexfile: PathBuf },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("logindex={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries results; diagnostics go to stderr
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Cannot use config file {:?}", path))?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);
    tracing::debug!("logindex v{}", env!("CARGO_PKG_VERSION"));

    let format = cli.format.unwrap_or(config.output.format);
    let mut printer = Printer::new(std::io::stdout().lock(), format);

    match cli.command {
        Commands::Build { logfile, indexfile } => match build_index(&logfile, &indexfile) {
            Ok(summary) => printer.build(&summary)?,
            Err(e) => report_failure(&e),
        },

        Commands::Query { logfile, indexfile } => {
            let engine = QueryEngine::new(logfile, indexfile);
            let stdin = std::io::stdin().lock();
            run_session(&engine, &config.query.levels, stdin, &mut printer)?;
        }

        Commands::QueryLevel {
            logfile,
            indexfile,
            level,
        } => {
            let engine = QueryEngine::new(logfile, indexfile);
            run_query(&mut printer, &engine, &Filter::level(level))?;
        }

        Commands::QueryTime {
            logfile,
            indexfile,
            start,
            end,
        } => {
            let (start, end) = match parse_time_range(&start, &end) {
                Ok(range) => range,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            let engine = QueryEngine::new(logfile, indexfile);
            run_query(&mut printer, &engine, &Filter::time_range(start, end))?;
        }

        Commands::Stats { indexfile } => match index_stats(&indexfile) {
            Ok(stats) => printer.stats(&stats)?,
            Err(e) => report_failure(&e),
        },

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    writeln!(printer.writer(), "Config written to {:?}", path)?;
                }
                None => {
                    printer.writer().write_all(config.as_bytes())?;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Operation failures are reported but keep a zero exit status
fn report_failure(err: &dyn std::error::Error) {
    tracing::error!("{}", err);
    eprintln!("Error: {}", err);
}

fn run_query<W: Write>(
    printer: &mut Printer<W>,
    engine: &QueryEngine,
    filter: &Filter,
) -> anyhow::Result<()> {
    match printer.query(engine, filter) {
        Ok(_) => Ok(()),
        Err(QueryError::Output(e)) => Err(e.into()),
        Err(e) => {
            report_failure(&e);
            Ok(())
        }
    }
}
