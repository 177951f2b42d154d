//! Periodic pull of server records into the local store.
//!
//! Each tick launches a fetch and does not wait for it, so a slow response
//! never delays the schedule and fetches may overlap. Merges are idempotent,
//! so overlapping fetches are harmless. A failed fetch is logged and the
//! next tick tries again.

use std::sync::Arc;

use payboard_core::{validate_record, PaymentRecord};
use payboard_store::{RecordStore, RecordStoreExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::transport::Transport;

/// Outcome of a single fetch-and-merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Records returned by the server.
    pub fetched: usize,
    /// Records new to the store.
    pub inserted: usize,
    /// Records the store already held.
    pub duplicates: usize,
    /// Records dropped by validation.
    pub invalid: usize,
    /// The fetch itself failed.
    pub fetch_failed: bool,
}

/// Pulls records from the transport into the store.
pub struct SyncPoller<S: RecordStore, T: Transport> {
    store: Arc<S>,
    transport: Arc<T>,
    config: SyncConfig,
}

impl<S: RecordStore, T: Transport> Clone for SyncPoller<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

impl<S: RecordStore, T: Transport> SyncPoller<S, T> {
    /// Create a poller.
    pub fn new(store: Arc<S>, transport: Arc<T>, config: SyncConfig) -> Self {
        Self {
            store,
            transport,
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetch once and merge the result.
    ///
    /// Never fails: fetch errors and store errors are logged and reported.
    pub async fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        // 1. Fetch
        let records = match self.transport.fetch_payments().await {
            Ok(records) => records,
            Err(e) => {
                debug!(error = %e, "payment fetch failed");
                report.fetch_failed = true;
                return report;
            }
        };
        report.fetched = records.len();

        // 2. Drop invalid records
        let records: Vec<PaymentRecord> = if self.config.validate_records {
            records
                .into_iter()
                .filter(|record| match validate_record(record) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "dropping invalid record");
                        report.invalid += 1;
                        false
                    }
                })
                .collect()
        } else {
            records
        };

        // 3. Merge
        match self.store.merge_all(records) {
            Ok(summary) => {
                report.inserted = summary.inserted;
                report.duplicates = summary.duplicates;
            }
            Err(e) => warn!(error = %e, "merge failed"),
        }

        debug!(
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.duplicates,
            "poll tick"
        );
        report
    }
}

impl<S, T> SyncPoller<S, T>
where
    S: RecordStore + 'static,
    T: Transport + 'static,
{
    /// Start ticking on the current runtime.
    ///
    /// The first tick fires immediately. The schedule runs until the
    /// returned handle is stopped or dropped.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = self.config.poll_interval;
        let poller = self;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(period_ms = period.as_millis() as u64, "poller started");

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let poller = poller.clone();
                        tokio::spawn(async move {
                            poller.tick().await;
                        });
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }

            info!("poller stopped");
        });

        PollerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running poll schedule.
///
/// Stopping ends the schedule; a fetch already in flight still completes
/// and merges.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the schedule and wait for it to wind down.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "poller task ended abnormally");
            }
        }
    }

    /// Whether the schedule is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}
