//! Submission of new payments.
//!
//! A submission stamps the draft with a fresh identifier and timestamp, then
//! sends create requests until the server answers with something final:
//!
//! ```text
//!            ┌────────── 503: same record ──────────┐
//!            v                                      │
//! Stamp ──> Send ── 2xx ──> merge locally, done     │
//!   ^        │ └────────────────────────────────────┘
//!   │        ├── 409 ──> back to Stamp (new id + timestamp)
//!   │        └── other / transport error ──> fail
//!   └────────┘
//! ```
//!
//! There is no attempt cap and no backoff.

use std::sync::Arc;

use payboard_core::{validate_draft, IdentifierGenerator, PaymentDraft, PaymentRecord};
use payboard_store::RecordStore;
use tracing::{debug, info, warn};

use crate::config::ATTEMPT_WARN_EVERY;
use crate::error::{Result, SyncError};
use crate::messages::CreateOutcome;
use crate::transport::Transport;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    /// The record as acknowledged by the server.
    pub record: PaymentRecord,
    /// Create requests sent, including the successful one.
    pub attempts: u64,
    /// Identifiers generated: one, plus one per conflict.
    pub generations: u64,
}

impl SubmitReport {
    /// Requests sent after the first.
    pub fn retries(&self) -> u64 {
        self.attempts.saturating_sub(1)
    }
}

enum Step {
    Stamp,
    Send(PaymentRecord),
}

/// Sends drafts to the payment service and merges acknowledged records.
pub struct SubmissionClient<S: RecordStore, T: Transport> {
    store: Arc<S>,
    transport: Arc<T>,
    ids: IdentifierGenerator,
}

impl<S: RecordStore, T: Transport> SubmissionClient<S, T> {
    /// Create a client.
    pub fn new(store: Arc<S>, transport: Arc<T>, ids: IdentifierGenerator) -> Self {
        Self {
            store,
            transport,
            ids,
        }
    }

    /// Submit a draft and return the stored record.
    pub async fn submit(&self, draft: &PaymentDraft) -> Result<PaymentRecord> {
        Ok(self.submit_with_report(draft).await?.record)
    }

    /// Submit a draft and report how many requests it took.
    ///
    /// Fails without any request if the draft is invalid. On success the
    /// record has been merged into the store.
    pub async fn submit_with_report(&self, draft: &PaymentDraft) -> Result<SubmitReport> {
        validate_draft(draft)?;

        let mut attempts: u64 = 0;
        let mut generations: u64 = 0;
        let mut step = Step::Stamp;

        loop {
            step = match step {
                Step::Stamp => {
                    let (id, timestamp) = self.ids.generate();
                    generations = generations.saturating_add(1);
                    Step::Send(draft.stamp(id, timestamp))
                }
                Step::Send(record) => {
                    attempts = attempts.saturating_add(1);
                    if attempts % ATTEMPT_WARN_EVERY == 0 {
                        warn!(attempts, id = %record.id, "payment still not acknowledged");
                    }

                    let code = self.transport.create_payment(&record).await?;
                    match CreateOutcome::from_status(code) {
                        CreateOutcome::Created => {
                            self.store.merge(record.clone())?;
                            info!(id = %record.id, attempts, "payment created");
                            return Ok(SubmitReport {
                                record,
                                attempts,
                                generations,
                            });
                        }
                        CreateOutcome::Transient => {
                            debug!(id = %record.id, "service unavailable, resending");
                            Step::Send(record)
                        }
                        CreateOutcome::Conflict => {
                            debug!(id = %record.id, "identifier taken, regenerating");
                            Step::Stamp
                        }
                        CreateOutcome::Rejected(status) => {
                            warn!(id = %record.id, status, "payment rejected");
                            return Err(SyncError::Rejected { status });
                        }
                    }
                }
            };
        }
    }
}
