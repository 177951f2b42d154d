//! Wire shapes and status classification for the payment service.

use serde::{Deserialize, Serialize};

/// Status codes the create protocol distinguishes.
pub mod status {
    /// Record created.
    pub const CREATED: u16 = 201;
    /// Identifier already exists.
    pub const CONFLICT: u16 = 409;
    /// Server temporarily unable to serve.
    pub const SERVICE_UNAVAILABLE: u16 = 503;
}

/// Response envelope: every body wraps its payload in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Either a single item or a list of them.
///
/// The payment endpoint answers with one record per request; servers that
/// return the full list are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// How the submission client reacts to a create response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Acknowledged; the record exists on the server.
    Created,
    /// Identifier collision; regenerate and resend.
    Conflict,
    /// Transient failure; resend with the same identifier.
    Transient,
    /// Anything else; stop.
    Rejected(u16),
}

impl CreateOutcome {
    /// Classify an HTTP status.
    pub fn from_status(code: u16) -> Self {
        match code {
            200..=299 => CreateOutcome::Created,
            status::CONFLICT => CreateOutcome::Conflict,
            status::SERVICE_UNAVAILABLE => CreateOutcome::Transient,
            other => CreateOutcome::Rejected(other),
        }
    }

    /// Whether the client should send again.
    pub fn is_retryable(self) -> bool {
        matches!(self, CreateOutcome::Conflict | CreateOutcome::Transient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payboard_core::{PaymentRecord, User};

    #[test]
    fn test_classify_status() {
        assert_eq!(CreateOutcome::from_status(201), CreateOutcome::Created);
        assert_eq!(CreateOutcome::from_status(409), CreateOutcome::Conflict);
        assert_eq!(CreateOutcome::from_status(503), CreateOutcome::Transient);
        assert_eq!(CreateOutcome::from_status(500), CreateOutcome::Rejected(500));
        assert_eq!(CreateOutcome::from_status(404), CreateOutcome::Rejected(404));
        assert!(!CreateOutcome::from_status(400).is_retryable());
    }

    #[test]
    fn test_single_record_envelope() {
        let body = r#"{"data": {
            "id": "1", "date": "2024-01-02T15:04:05.000Z",
            "sender": {"id": 1, "name": "Al"}, "receiver": {"id": 2, "name": "Bo"},
            "amount": "1.00", "currency": "USD", "memo": "m"
        }}"#;
        let envelope: DataEnvelope<OneOrMany<PaymentRecord>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.into_vec().len(), 1);
    }

    #[test]
    fn test_user_list_envelope() {
        let body = r#"{"data": [{"id": 1, "name": "Al"}, {"id": 2, "name": "Bo"}]}"#;
        let envelope: DataEnvelope<Vec<User>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data[1], User::new(2, "Bo"));
    }
}
