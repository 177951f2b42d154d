//! The Dashboard: unified API for the Payboard client.
//!
//! The Dashboard ties the local store, the poller and the submission
//! client to one transport and one configuration.

use std::sync::Arc;

use payboard_core::{IdentifierGenerator, PaymentDraft, PaymentRecord, User};
use payboard_store::{evaluate, FilterCriteria, MemoryStore, RecordStore};
use payboard_sync::{
    HttpTransport, PollerHandle, SubmissionClient, SubmitReport, SyncPoller, TickReport, Transport,
};
use tokio::sync::watch;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

/// The main Dashboard struct.
///
/// Provides a unified API for:
/// - Keeping the local record set in sync with the server
/// - Submitting new payments
/// - Querying the bounded record view
/// - Resolving users for the sender/receiver picker
pub struct Dashboard<S: RecordStore, T: Transport> {
    store: Arc<S>,
    transport: Arc<T>,
    config: DashboardConfig,
    client: SubmissionClient<S, T>,
    poller: Option<PollerHandle>,
    users: Vec<User>,
}

impl Dashboard<MemoryStore, HttpTransport> {
    /// Dashboard backed by an in-memory store and the configured HTTP
    /// endpoints.
    pub fn connect(config: DashboardConfig) -> Self {
        let transport = HttpTransport::new(config.payment_url.clone(), config.user_url.clone());
        Self::new(MemoryStore::new(), transport, config)
    }
}

impl<S, T> Dashboard<S, T>
where
    S: RecordStore + 'static,
    T: Transport + 'static,
{
    /// Create a new dashboard on wall-clock identifiers.
    pub fn new(store: S, transport: T, config: DashboardConfig) -> Self {
        Self::with_identifiers(store, transport, config, IdentifierGenerator::system())
    }

    /// Create a new dashboard with a custom identifier source.
    pub fn with_identifiers(
        store: S,
        transport: T,
        config: DashboardConfig,
        ids: IdentifierGenerator,
    ) -> Self {
        let store = Arc::new(store);
        let transport = Arc::new(transport);
        let client = SubmissionClient::new(Arc::clone(&store), Arc::clone(&transport), ids);

        Self {
            store,
            transport,
            config,
            client,
            poller: None,
            users: Vec::new(),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the transport reference.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Polling
    // ─────────────────────────────────────────────────────────────────────────

    fn make_poller(&self) -> SyncPoller<S, T> {
        SyncPoller::new(
            Arc::clone(&self.store),
            Arc::clone(&self.transport),
            self.config.sync.clone(),
        )
    }

    /// Start the poll schedule on the current runtime.
    pub fn start_polling(&mut self) -> Result<()> {
        if self.poller.is_some() {
            return Err(DashboardError::AlreadyPolling);
        }
        self.poller = Some(self.make_poller().spawn());
        Ok(())
    }

    /// Stop the poll schedule. Returns false if it was not running.
    pub async fn stop_polling(&mut self) -> bool {
        match self.poller.take() {
            Some(handle) => {
                handle.stop().await;
                true
            }
            None => false,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// Run one fetch-and-merge outside the schedule.
    pub async fn poll_once(&self) -> TickReport {
        self.make_poller().tick().await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the user list and keep it for [`find_user`](Self::find_user).
    pub async fn load_users(&mut self) -> Result<&[User]> {
        self.users = self.transport.fetch_users().await?;
        info!(count = self.users.len(), "users loaded");
        Ok(&self.users)
    }

    /// Users from the last [`load_users`](Self::load_users).
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Resolve a picker selection. Unknown ids give [`User::NONE`].
    pub fn find_user(&self, id: u64) -> User {
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .unwrap_or(User::NONE)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit a draft; on success the record is already in the store.
    pub async fn create_payment(&self, draft: &PaymentDraft) -> Result<PaymentRecord> {
        Ok(self.client.submit(draft).await?)
    }

    /// [`create_payment`](Self::create_payment) with attempt counts.
    pub async fn create_payment_with_report(&self, draft: &PaymentDraft) -> Result<SubmitReport> {
        Ok(self.client.submit_with_report(draft).await?)
    }

    /// Every stored record, newest first.
    pub fn records(&self) -> Result<Vec<PaymentRecord>> {
        Ok(self.store.snapshot()?)
    }

    /// The bounded, filtered view the table shows.
    pub fn view(&self, criteria: &FilterCriteria) -> Result<Vec<PaymentRecord>> {
        let snapshot = self.store.snapshot()?;
        Ok(evaluate(&snapshot, criteria))
    }

    /// Receiver that changes whenever a record is inserted.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }
}
