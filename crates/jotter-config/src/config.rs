//! Top-level configuration

use serde::{Deserialize, Serialize};

use crate::components::{
    CacheComponentConfig, FormComponentConfig, LoggingComponentConfig, StoreComponentConfig,
    ValidationComponentConfig,
};
use crate::{ConfigError, ConfigResult};

/// Complete jotter configuration
///
/// Every section is optional in the TOML file and falls back to its
/// [`Default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JotterConfig {
    /// Form re-validation behaviour
    pub form: FormComponentConfig,
    /// Validator thresholds
    pub validation: ValidationComponentConfig,
    /// Shared notes cache
    pub cache: CacheComponentConfig,
    /// In-memory note store simulation
    pub store: StoreComponentConfig,
    /// Logging
    pub logging: LoggingComponentConfig,
}

impl JotterConfig {
    /// Check values that parse but cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if self.validation.title_min_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "validation.title_min_len".to_string(),
                value: "must be at least 1".to_string(),
            });
        }
        if self.validation.content_min_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "validation.content_min_len".to_string(),
                value: "must be at least 1".to_string(),
            });
        }
        if self.cache.notes_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "cache.notes_key".to_string(),
                value: "must contain at least one segment".to_string(),
            });
        }
        Ok(())
    }
}
