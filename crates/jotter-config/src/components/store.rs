//! In-memory note store configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Simulation knobs for the in-memory note store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreComponentConfig {
    /// Artificial latency added to every store call
    pub latency_ms: u64,
    /// Make every create call fail
    pub fail_creates: bool,
}

impl StoreComponentConfig {
    /// Latency as a [`Duration`], `None` when zero
    pub fn latency(&self) -> Option<Duration> {
        (self.latency_ms > 0).then(|| Duration::from_millis(self.latency_ms))
    }
}
