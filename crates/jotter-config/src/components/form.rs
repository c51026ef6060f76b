//! Form component configuration
//!
//! Controls when the form re-validates and the thresholds the validator uses.

use serde::{Deserialize, Serialize};

/// Form behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormComponentConfig {
    /// Re-validate a field when it loses focus
    pub validate_on_blur: bool,
    /// Re-validate a field on every edit; when off, edits leave shown errors alone
    pub revalidate_on_change: bool,
}

impl Default for FormComponentConfig {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
            revalidate_on_change: false,
        }
    }
}

/// Validator thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationComponentConfig {
    /// Minimum title length in characters
    pub title_min_len: usize,
    /// Minimum content length in characters
    pub content_min_len: usize,
}

impl Default for ValidationComponentConfig {
    fn default() -> Self {
        Self {
            title_min_len: 3,
            content_min_len: 5,
        }
    }
}
