//! Configuration loading

use std::path::Path;

use tracing::debug;

use crate::{ConfigError, ConfigResult, JotterConfig};

/// Loads [`JotterConfig`] from TOML
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse and validate a TOML string
    pub fn load_from_str(contents: &str) -> ConfigResult<JotterConfig> {
        let config: JotterConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<JotterConfig> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Self::load_from_str(&contents)
    }

    /// Load from `path` when given, otherwise return defaults
    pub async fn load_or_default(path: Option<&Path>) -> ConfigResult<JotterConfig> {
        match path {
            Some(path) => Self::load_from_file(path).await,
            None => {
                debug!("No config file given, using defaults");
                Ok(JotterConfig::default())
            }
        }
    }
}
