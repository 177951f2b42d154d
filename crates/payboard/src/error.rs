//! Error types for the dashboard.

use payboard_core::ValidationError;
use payboard_store::StoreError;
use payboard_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Sync error.
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    /// Bad configuration value.
    #[error("invalid configuration {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// Polling was started twice.
    #[error("poller already running")]
    AlreadyPolling,
}

impl DashboardError {
    /// Text for the user. See [`SyncError::user_message`].
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Sync(e) => e.user_message(),
            DashboardError::Validation(e) if !e.draft_issues().is_empty() => e
                .draft_issues()
                .iter()
                .map(|issue| issue.message())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => payboard_sync::CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
