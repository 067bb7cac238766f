//! Error taxonomy
//!
//! Validation errors are rejected before any state mutation; unknown ids are
//! hard failures only for whole-board operations (object-level operations
//! treat them as tolerated no-ops at the scene-graph layer instead).
//! Persistence failures surface here and never roll back local edits.

use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Failures from the external persistence adapter
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("board {0} not found")]
    NotFound(Uuid),

    /// Transient storage/network failure; safe to retry
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The adapter gave up after its bounded wait; safe to retry
    #[error("storage timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage rejected record: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

/// Errors surfaced by the editing core
#[derive(Debug, Error)]
pub enum CoreError {
    /// Rejected synchronously before any state mutation
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("template {0} not found")]
    TemplateNotFound(Uuid),

    /// The authorization gate refused the save path
    #[error("editing board {0} is not permitted")]
    Forbidden(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(StoreError::Unavailable("connection reset".into()).is_retryable());
        assert!(StoreError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(!StoreError::NotFound(Uuid::new_v4()).is_retryable());
        assert!(!StoreError::Rejected("schema mismatch".into()).is_retryable());
    }

    #[test]
    fn test_store_errors_convert() {
        let err: CoreError = StoreError::Unavailable("down".into()).into();
        assert!(matches!(err, CoreError::Store(_)));
    }
}
