use clap::{Args, Parser, Subcommand, ValueEnum};
use jotter_config::LoggingComponentConfig;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including form state transitions
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "jot - create notes through a validated form")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file; `--verbose` wins over `--log-level`
    pub fn effective_level(&self, logging: &LoggingComponentConfig) -> LevelFilter {
        if self.verbose {
            return LevelFilter::DEBUG;
        }
        if let Some(level) = self.log_level {
            return level.into();
        }
        LevelFilter::from_str(&logging.level).unwrap_or(LevelFilter::WARN)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in the note form from flags and submit it once
    New(NewArgs),

    /// Interactive form session on stdin
    Form,
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Note title (at least 3 characters)
    #[arg(long, default_value = "")]
    pub title: String,

    /// Note content (at least 5 characters)
    #[arg(long, default_value = "")]
    pub content: String,

    /// One of Todo, Work, Personal, Meeting, Shopping
    #[arg(long, default_value = "Todo")]
    pub tag: String,

    /// Make the note store reject the create
    #[arg(long)]
    pub fail: bool,

    /// Print the final form view as JSON
    #[arg(long)]
    pub json: bool,
}
