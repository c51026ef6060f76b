//! Notes cache configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shared notes cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheComponentConfig {
    /// Key segments invalidated after a successful create
    pub notes_key: Vec<String>,
    /// Age after which an entry counts as stale; 0 disables time-based staleness
    pub stale_after_secs: u64,
}

impl CacheComponentConfig {
    /// Time-based staleness window, if enabled
    pub fn stale_after(&self) -> Option<Duration> {
        (self.stale_after_secs > 0).then(|| Duration::from_secs(self.stale_after_secs))
    }
}

impl Default for CacheComponentConfig {
    fn default() -> Self {
        Self {
            notes_key: vec!["notes".to_string()],
            stale_after_secs: 0,
        }
    }
}
