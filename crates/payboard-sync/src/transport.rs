//! Transport abstraction for the payment service.
//!
//! The transport layer issues requests and decodes response bodies. It does
//! not interpret create statuses; that is the submission client's job.

use async_trait::async_trait;
use payboard_core::{PaymentRecord, User};

use crate::error::Result;

/// Transport trait for talking to the payment and user endpoints.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the records currently offered by the payment endpoint.
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>>;

    /// Fetch the selectable users.
    async fn fetch_users(&self) -> Result<Vec<User>>;

    /// Send a create request and return the response status code.
    ///
    /// An `Err` means no status was received at all.
    async fn create_payment(&self, record: &PaymentRecord) -> Result<u16>;
}

/// An in-memory payment service for testing.
///
/// Behaves like the real endpoints: created records show up in later
/// fetches and a reused identifier gets a conflict. Statuses can be
/// scripted ahead of time to force transient failures or collisions.
pub mod memory {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use crate::error::SyncError;
    use crate::messages::{status, CreateOutcome};

    #[derive(Default)]
    struct ServerState {
        records: Vec<PaymentRecord>,
        users: Vec<User>,
        /// Statuses returned to the next create requests, in order.
        scripted: VecDeque<u16>,
        /// Number of upcoming fetches that fail.
        failing_fetches: usize,
        fetch_delay: Option<Duration>,
        fetch_count: usize,
        create_log: Vec<PaymentRecord>,
    }

    /// Fake payment service.
    #[derive(Default)]
    pub struct MemoryTransport {
        state: Mutex<ServerState>,
    }

    impl MemoryTransport {
        /// Create a service with no records and no users.
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a service that offers `users`.
        pub fn with_users(users: Vec<User>) -> Self {
            Self {
                state: Mutex::new(ServerState {
                    users,
                    ..Default::default()
                }),
            }
        }

        /// Add a record on the server side, as another client would.
        pub async fn push_record(&self, record: PaymentRecord) {
            self.state.lock().await.records.push(record);
        }

        /// Queue statuses for the next create requests.
        ///
        /// A scripted success stores the record; a scripted failure does not.
        pub async fn script_statuses(&self, statuses: impl IntoIterator<Item = u16>) {
            self.state.lock().await.scripted.extend(statuses);
        }

        /// Make the next `n` fetches fail with a transport error.
        pub async fn fail_next_fetches(&self, n: usize) {
            self.state.lock().await.failing_fetches = n;
        }

        /// Delay every payment fetch by `delay`.
        pub async fn set_fetch_delay(&self, delay: Duration) {
            self.state.lock().await.fetch_delay = Some(delay);
        }

        /// Number of payment fetches started so far.
        pub async fn fetch_count(&self) -> usize {
            self.state.lock().await.fetch_count
        }

        /// Every record sent to the create endpoint, in order.
        pub async fn create_requests(&self) -> Vec<PaymentRecord> {
            self.state.lock().await.create_log.clone()
        }

        /// Records the server currently holds.
        pub async fn server_records(&self) -> Vec<PaymentRecord> {
            self.state.lock().await.records.clone()
        }
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>> {
            let delay = {
                let mut state = self.state.lock().await;
                state.fetch_count += 1;
                if state.failing_fetches > 0 {
                    state.failing_fetches -= 1;
                    return Err(SyncError::Transport("connection refused".into()));
                }
                state.fetch_delay
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            Ok(self.state.lock().await.records.clone())
        }

        async fn fetch_users(&self) -> Result<Vec<User>> {
            Ok(self.state.lock().await.users.clone())
        }

        async fn create_payment(&self, record: &PaymentRecord) -> Result<u16> {
            let mut state = self.state.lock().await;
            state.create_log.push(record.clone());

            let exists = state.records.iter().any(|r| r.id == record.id);
            let code = match state.scripted.pop_front() {
                Some(code) => code,
                None if exists => status::CONFLICT,
                None => status::CREATED,
            };

            if CreateOutcome::from_status(code) == CreateOutcome::Created && !exists {
                state.records.push(record.clone());
            }

            Ok(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryTransport;
    use super::*;
    use payboard_core::{Amount, Currency, PaymentDraft, PaymentId};

    fn make_record(id: &str) -> PaymentRecord {
        PaymentDraft::empty()
            .sender(User::new(1, "Al"))
            .receiver(User::new(2, "Bo"))
            .amount(Amount::from_minor(500))
            .currency(Currency::GBP)
            .stamp(PaymentId::from(id), "2024-01-02T15:04:05.000Z".into())
    }

    #[tokio::test]
    async fn test_memory_transport_create_then_conflict() {
        let transport = MemoryTransport::new();
        let record = make_record("1");

        assert_eq!(transport.create_payment(&record).await.unwrap(), 201);
        assert_eq!(transport.create_payment(&record).await.unwrap(), 409);
        assert_eq!(transport.fetch_payments().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_scripted_failure_stores_nothing() {
        let transport = MemoryTransport::new();
        transport.script_statuses([503]).await;

        assert_eq!(transport.create_payment(&make_record("1")).await.unwrap(), 503);
        assert!(transport.server_records().await.is_empty());
        assert_eq!(transport.create_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_fetches() {
        let transport = MemoryTransport::new();
        transport.fail_next_fetches(1).await;

        assert!(transport.fetch_payments().await.is_err());
        assert!(transport.fetch_payments().await.is_ok());
        assert_eq!(transport.fetch_count().await, 2);
    }
}
