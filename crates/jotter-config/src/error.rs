//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::JotterConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        value: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
