//! Logging configuration

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingComponentConfig {
    /// Default level for jotter crates (off, error, warn, info, debug, trace)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    /// Structured JSON lines
    #[serde(rename = "json")]
    Json,
    /// Compact single-line text
    #[default]
    #[serde(rename = "text")]
    Text,
    /// Multi-line human readable output
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for LoggingComponentConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}
