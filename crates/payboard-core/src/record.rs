//! Payment records and drafts.
//!
//! A [`PaymentRecord`] is immutable once stamped with an identifier and a
//! timestamp. A [`PaymentDraft`] is the same data before stamping: what the
//! user filled in, not yet known to the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Amount, Currency, PaymentId, User};

/// Display format for timestamps in the payment table.
pub const DISPLAY_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// A payment exchanged between client and server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    /// ISO-8601 instant the record was stamped.
    #[serde(rename = "date")]
    pub timestamp: String,
    pub sender: User,
    pub receiver: User,
    pub amount: Amount,
    pub currency: Currency,
    #[serde(default)]
    pub memo: String,
}

impl PaymentRecord {
    /// Parse the ISO-8601 timestamp.
    pub fn parsed_timestamp(&self) -> Result<DateTime<Utc>, CoreError> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CoreError::InvalidTimestamp {
                value: self.timestamp.clone(),
                reason: e.to_string(),
            })
    }

    /// Timestamp formatted for the payment table, e.g. `01/02/2024 03:04:05 PM`.
    pub fn display_timestamp(&self) -> Result<String, CoreError> {
        Ok(self
            .parsed_timestamp()?
            .format(DISPLAY_TIME_FORMAT)
            .to_string())
    }

    /// The draft this record was stamped from.
    pub fn draft(&self) -> PaymentDraft {
        PaymentDraft {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            amount: self.amount,
            currency: self.currency,
            memo: self.memo.clone(),
        }
    }
}

/// A payment as entered by the user, before an identifier is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub sender: User,
    pub receiver: User,
    pub amount: Amount,
    pub currency: Currency,
    pub memo: String,
}

impl PaymentDraft {
    /// Start a draft with nothing selected, zero amount and the default currency.
    pub fn empty() -> Self {
        Self {
            sender: User::NONE,
            receiver: User::NONE,
            amount: Amount::from_minor(0),
            currency: Currency::default(),
            memo: String::new(),
        }
    }

    /// Set the sender.
    pub fn sender(mut self, sender: User) -> Self {
        self.sender = sender;
        self
    }

    /// Set the receiver.
    pub fn receiver(mut self, receiver: User) -> Self {
        self.receiver = receiver;
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    /// Set the currency.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the memo.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Attach an identifier and timestamp, producing a record.
    pub fn stamp(&self, id: PaymentId, timestamp: String) -> PaymentRecord {
        PaymentRecord {
            id,
            timestamp,
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            amount: self.amount,
            currency: self.currency,
            memo: self.memo.clone(),
        }
    }
}

impl Default for PaymentDraft {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft() -> PaymentDraft {
        PaymentDraft::empty()
            .sender(User::new(1, "Al"))
            .receiver(User::new(2, "Bo"))
            .amount("10".parse().unwrap())
            .currency(Currency::USD)
            .memo("lunch")
    }

    #[test]
    fn test_stamp_preserves_draft_fields() {
        let draft = make_draft();
        let record = draft.stamp(PaymentId::from("123"), "2024-01-02T15:04:05.000Z".into());

        assert_eq!(record.id.as_str(), "123");
        assert_eq!(record.draft(), draft);
    }

    #[test]
    fn test_wire_format() {
        let record = make_draft().stamp(PaymentId::from("7"), "2024-01-02T15:04:05.000Z".into());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["date"], "2024-01-02T15:04:05.000Z");
        assert_eq!(json["amount"], "10.00");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["sender"]["name"], "Al");
    }

    #[test]
    fn test_parse_server_record() {
        let json = r#"{
            "id": "9981",
            "date": "2024-03-01T08:00:00.000Z",
            "sender": {"id": 4, "name": "Di"},
            "receiver": {"id": 5, "name": "Ed"},
            "amount": "0.50",
            "currency": "EUR",
            "memo": ""
        }"#;
        let record: PaymentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.currency, Currency::EUR);
        assert_eq!(record.amount, Amount::from_minor(50));
    }

    #[test]
    fn test_display_timestamp() {
        let record = make_draft().stamp(PaymentId::from("7"), "2024-01-02T15:04:05.000Z".into());
        assert_eq!(record.display_timestamp().unwrap(), "01/02/2024 03:04:05 PM");
    }

    #[test]
    fn test_invalid_timestamp() {
        let record = make_draft().stamp(PaymentId::from("7"), "yesterday".into());
        assert!(matches!(
            record.parsed_timestamp(),
            Err(CoreError::InvalidTimestamp { .. })
        ));
    }
}
