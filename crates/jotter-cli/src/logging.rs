//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays clean for form output.

use jotter_config::LogFormat;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter directives for the jotter crates at `level`
pub fn filter_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("jotter_core={level},jotter_config={level},jotter_cli={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence when set.
pub fn init_logging(level: LevelFilter, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Text => builder.compact().init(),
    }
}
