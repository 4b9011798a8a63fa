use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use maillog_logging::{init_tracing, LogFormat, DEFAULT_LOG_LEVEL};
use maillog_sessions::{assemble_file, DurationMode};

mod config;
mod input;
mod output;

use config::MaillogConfig;

#[derive(Parser, Debug)]
#[command(
    name = "maillog",
    about = "Reassemble complete mail sessions from interleaved log lines",
    version,
    author
)]
struct Cli {
    /// Path to the log file
    #[arg(long = "log", value_name = "PATH")]
    log: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How session durations are computed (default: elapsed)
    #[arg(long, value_enum)]
    duration_mode: Option<DurationModeChoice>,

    /// Path to a maillog.toml (default: ./maillog.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Diagnostic log level or filter directive (RUST_LOG overrides)
    #[arg(long)]
    log_level: Option<String>,

    /// Diagnostic log format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatChoice>,

    /// Print session counts to stderr when done
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DurationModeChoice {
    /// Time from the client line to the status line
    Elapsed,
    /// Reproduce the wrapped wall-clock values of the older tooling
    Legacy,
}

impl From<DurationModeChoice> for DurationMode {
    fn from(choice: DurationModeChoice) -> Self {
        match choice {
            DurationModeChoice::Elapsed => DurationMode::Elapsed,
            DurationModeChoice::Legacy => DurationMode::Legacy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", error_report(&e));
        std::process::exit(1);
    }
}

/// One-line error report: a coloured `[ERROR]:` tag and the full cause chain.
fn error_report(e: &anyhow::Error) -> String {
    format!("{} {:#}", "[ERROR]:".red().bold(), e)
}

fn run(cli: Cli) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = MaillogConfig::load(cli.config.as_deref(), &working_dir)?.unwrap_or_default();

    let log_level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let log_format = cli
        .log_format
        .map(LogFormat::from)
        .or(config.log_format)
        .unwrap_or_default();
    init_tracing(log_level, log_format);

    let mode = cli
        .duration_mode
        .map(DurationMode::from)
        .or(config.duration_mode)
        .unwrap_or_default();

    input::check_log_path(&cli.log)?;

    let assembler = assemble_file(&cli.log, mode)?;
    let seen = assembler.len();
    let sessions = assembler.full_sessions();

    let report = output::render_sessions(&sessions)?;
    output::write_report(&report, cli.output.as_deref())?;

    if cli.summary {
        eprintln!(
            "{} {} sessions seen, {} complete ({} duration)",
            "->".bright_green(),
            seen.to_string().bold(),
            sessions.len().to_string().bold(),
            mode
        );
    }

    Ok(())
}
