//! Note store error types

use thiserror::Error;

/// Errors a note store can report
///
/// The submission layer treats these as opaque: any of them moves a pending
/// submission to failed and surfaces the same generic banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Timeout error: operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for note store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    pub fn rejected<S: Into<String>>(msg: S) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Check if resubmitting could succeed without changing the draft
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }
}
