//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use payboard_core::{
    format_timestamp, Amount, Clock, Currency, IdentifierGenerator, PaymentDraft, PaymentId,
    PaymentRecord, User,
};
use payboard_store::MemoryStore;
use payboard_sync::{MemoryTransport, SubmissionClient, SyncConfig, SyncPoller};

/// 2024-01-02T15:04:05Z, the instant every fixture clock starts at.
pub const EPOCH_SECONDS: i64 = 1_704_207_845;

/// Start instant of fixture clocks.
pub fn fixture_epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_SECONDS, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A clock that moves forward by a fixed step every time it is read.
///
/// Stepping by at least a second guarantees each read seeds a different
/// identifier.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// One-second steps from [`fixture_epoch`].
    pub fn seconds() -> Self {
        Self::new(fixture_epoch(), Duration::seconds(1))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
        let now = *next;
        *next += self.step;
        now
    }
}

/// The users every fixture server offers.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Alice"),
        User::new(2, "Bob"),
        User::new(3, "Carol"),
    ]
}

/// A valid draft between the first two sample users.
pub fn sample_draft() -> PaymentDraft {
    let users = sample_users();
    PaymentDraft::empty()
        .sender(users[0].clone())
        .receiver(users[1].clone())
        .amount(Amount::from_minor(1_000))
        .currency(Currency::USD)
        .memo("lunch")
}

/// Build a record with explicit fields.
pub fn make_record(
    id: &str,
    sender: &str,
    cents: i64,
    currency: Currency,
    at: DateTime<Utc>,
) -> PaymentRecord {
    PaymentDraft::empty()
        .sender(User::new(1, sender))
        .receiver(User::new(2, "Receiver"))
        .amount(Amount::from_minor(cents))
        .currency(currency)
        .memo(format!("payment {id}"))
        .stamp(PaymentId::from(id), format_timestamp(at))
}

/// `count` distinct records `p0, p1, ...`, one second apart, oldest first.
pub fn numbered_records(count: usize) -> Vec<PaymentRecord> {
    (0..count)
        .map(|i| {
            let at = fixture_epoch() + Duration::seconds(i as i64);
            make_record(&format!("p{i}"), "Alice", 100 + i as i64, Currency::GBP, at)
        })
        .collect()
}

/// A store, a fake server and a stepping clock wired together.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub transport: Arc<MemoryTransport>,
    pub clock: Arc<SteppingClock>,
}

impl TestFixture {
    /// Empty store, server offering [`sample_users`].
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            transport: Arc::new(MemoryTransport::with_users(sample_users())),
            clock: Arc::new(SteppingClock::seconds()),
        }
    }

    /// Identifier generator reading the fixture clock.
    pub fn identifiers(&self) -> IdentifierGenerator {
        IdentifierGenerator::new(self.clock.clone())
    }

    /// Submission client over the fixture store and server.
    pub fn submission_client(&self) -> SubmissionClient<MemoryStore, MemoryTransport> {
        SubmissionClient::new(self.store.clone(), self.transport.clone(), self.identifiers())
    }

    /// Poller over the fixture store and server.
    pub fn poller(&self, config: SyncConfig) -> SyncPoller<MemoryStore, MemoryTransport> {
        SyncPoller::new(self.store.clone(), self.transport.clone(), config)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payboard_store::RecordStore;

    #[test]
    fn test_stepping_clock_changes_identifier() {
        let ids = IdentifierGenerator::new(Arc::new(SteppingClock::seconds()));

        let (a, ts_a) = ids.generate();
        let (b, ts_b) = ids.generate();

        assert_ne!(a, b);
        assert_eq!(ts_a, "2024-01-02T15:04:05.000Z");
        assert_eq!(ts_b, "2024-01-02T15:04:06.000Z");
    }

    #[test]
    fn test_numbered_records_distinct() {
        let records = numbered_records(5);
        let store = MemoryStore::new();
        for record in records {
            store.merge(record).unwrap();
        }
        assert_eq!(store.len().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_fixture_submit_then_poll() {
        let fixture = TestFixture::new();

        let record = fixture.submission_client().submit(&sample_draft()).await.unwrap();
        let report = fixture.poller(SyncConfig::default()).tick().await;

        assert_eq!(report.duplicates, 1);
        assert_eq!(fixture.store.snapshot().unwrap(), vec![record]);
    }
}
