//! Error types for the sync module.

use thiserror::Error;

/// Message shown to the user for any terminal submission failure.
pub const CONNECTIVITY_MESSAGE: &str =
    "An unknown error occurred. Please check your internet connection!";

/// Errors that can occur during sync and submission.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never got a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A fetch got a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server refused a create request with a non-retryable status.
    #[error("create rejected with status {status}")]
    Rejected { status: u16 },

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] payboard_store::StoreError),

    /// Draft or record validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] payboard_core::ValidationError),
}

impl SyncError {
    /// Text for the user.
    ///
    /// Validation errors list the failing fields; every other failure gets
    /// the same generic connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Validation(e) if !e.draft_issues().is_empty() => e
                .draft_issues()
                .iter()
                .map(|issue| issue.message())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
