//! RecordStore trait: the abstract interface for the local record set.
//!
//! Both the poller and the submission client write through this trait,
//! and the view layer reads from it. Operations are synchronous: merging
//! and snapshotting never wait on I/O.

use payboard_core::{PaymentId, PaymentRecord};
use tokio::sync::watch;

use crate::error::Result;
use crate::state::MergeResult;

/// Counts from merging a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Records that were new.
    pub inserted: usize,
    /// Records whose id was already present.
    pub duplicates: usize,
}

/// The RecordStore trait.
///
/// # Design Notes
///
/// - **Idempotent merge**: merging a record whose id is present is a no-op
///   returning `AlreadyExists`. The stored copy is never updated.
/// - **Insertion order**: a new record goes in front of every record merged
///   before it. Snapshots are newest first.
/// - **No external locking**: implementations must be safe to call from the
///   poller and the submission client concurrently.
pub trait RecordStore: Send + Sync {
    /// Merge a record into the store.
    fn merge(&self, record: PaymentRecord) -> Result<MergeResult>;

    /// Copy of all records, newest first.
    fn snapshot(&self) -> Result<Vec<PaymentRecord>>;

    /// Check if a record exists by id.
    fn contains(&self, id: &PaymentId) -> Result<bool>;

    /// Number of records held.
    fn len(&self) -> Result<usize>;

    /// Subscribe to changes.
    ///
    /// The receiver holds a revision counter that increases on every
    /// insertion. Duplicate merges do not notify.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Extension trait for common store patterns.
pub trait RecordStoreExt: RecordStore {
    /// Merge records in iteration order.
    fn merge_all<I>(&self, records: I) -> Result<MergeSummary>
    where
        I: IntoIterator<Item = PaymentRecord>,
    {
        let mut summary = MergeSummary::default();
        for record in records {
            if self.merge(record)?.is_inserted() {
                summary.inserted += 1;
            } else {
                summary.duplicates += 1;
            }
        }
        Ok(summary)
    }

    /// Whether the store holds no records.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
