//! Error types for Payboard Core.

use thiserror::Error;

use crate::types::PaymentId;

/// Errors raised while parsing or building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("unknown currency: {0:?}")]
    UnknownCurrency(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// A single problem with a payment draft, as shown next to the form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftIssue {
    SenderNotSelected,
    ReceiverNotSelected,
    SameUser,
    NonPositiveAmount,
}

impl DraftIssue {
    /// The message the dashboard shows for this issue.
    pub fn message(self) -> &'static str {
        match self {
            DraftIssue::SenderNotSelected => "Please select the sender!",
            DraftIssue::ReceiverNotSelected => "Please select the receiver!",
            DraftIssue::SameUser => "The sender and receiver should not the same user!",
            DraftIssue::NonPositiveAmount => "Please input the correct amount value!",
        }
    }
}

/// Validation errors for drafts and incoming records.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid payment draft: {}", describe(.0))]
    InvalidDraft(Vec<DraftIssue>),

    #[error("record has an empty id")]
    EmptyId,

    #[error("record {id} has non-positive amount {amount}")]
    NonPositiveAmount { id: PaymentId, amount: String },

    #[error("record {id}: {source}")]
    Malformed {
        id: PaymentId,
        #[source]
        source: CoreError,
    },
}

impl ValidationError {
    /// Draft issues carried by this error, if it is a draft rejection.
    pub fn draft_issues(&self) -> &[DraftIssue] {
        match self {
            ValidationError::InvalidDraft(issues) => issues,
            _ => &[],
        }
    }
}

fn describe(issues: &[DraftIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message())
        .collect::<Vec<_>>()
        .join(" ")
}
