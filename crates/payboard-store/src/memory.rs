//! In-memory implementation of the RecordStore trait.
//!
//! Records live for the lifetime of the process; nothing is persisted.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use payboard_core::{PaymentId, PaymentRecord};
use tokio::sync::watch;

use crate::error::{Result, StoreError};
use crate::state::{MergeResult, StoreAction, StoreState};
use crate::traits::RecordStore;

/// In-memory record store.
///
/// Thread-safe via RwLock. Change notifications go out on a watch channel
/// carrying a revision number.
pub struct MemoryStore {
    inner: RwLock<StoreState>,
    revision: watch::Sender<u64>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: RwLock::new(StoreState::new()),
            revision,
        }
    }

    /// Current revision (number of insertions so far).
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Run `f` against the current state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&StoreState) -> R) -> Result<R> {
        let state = self.read()?;
        Ok(f(&state))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("revision", &self.revision())
            .finish_non_exhaustive()
    }
}

impl RecordStore for MemoryStore {
    fn merge(&self, record: PaymentRecord) -> Result<MergeResult> {
        let id = record.id.clone();
        let result = {
            let mut state = self.write()?;
            state.apply(StoreAction::Merge(record))
        };

        match result {
            MergeResult::Inserted => {
                self.revision.send_modify(|rev| *rev += 1);
                tracing::trace!(id = %id, "record merged");
            }
            MergeResult::AlreadyExists => {
                tracing::trace!(id = %id, "duplicate record ignored");
            }
        }

        Ok(result)
    }

    fn snapshot(&self) -> Result<Vec<PaymentRecord>> {
        self.with_state(StoreState::to_vec)
    }

    fn contains(&self, id: &PaymentId) -> Result<bool> {
        self.with_state(|state| state.contains(id))
    }

    fn len(&self) -> Result<usize> {
        self.with_state(StoreState::len)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RecordStoreExt;
    use payboard_core::{Amount, Currency, PaymentDraft, User};

    fn make_test_record(id: &str) -> PaymentRecord {
        PaymentDraft::empty()
            .sender(User::new(1, "Al"))
            .receiver(User::new(2, "Bo"))
            .amount(Amount::from_minor(1000))
            .currency(Currency::USD)
            .stamp(PaymentId::from(id), "2024-01-02T15:04:05.000Z".into())
    }

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let record = make_test_record("a");

        let result = store.merge(record.clone()).unwrap();
        assert_eq!(result, MergeResult::Inserted);

        assert!(store.contains(&record.id).unwrap());
        assert_eq!(store.snapshot().unwrap(), vec![record]);
    }

    #[test]
    fn test_with_state_reads_in_place() {
        let store = MemoryStore::new();
        store.merge(make_test_record("a")).unwrap();
        store.merge(make_test_record("b")).unwrap();

        let ids = store
            .with_state(|state| state.records().map(|r| r.id.to_string()).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.with_state(StoreState::len).unwrap(), 2);
    }

    #[test]
    fn test_memory_store_idempotent() {
        let store = MemoryStore::new();
        let record = make_test_record("a");

        let r1 = store.merge(record.clone()).unwrap();
        assert_eq!(r1, MergeResult::Inserted);

        let r2 = store.merge(record).unwrap();
        assert_eq!(r2, MergeResult::AlreadyExists);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_merge_all_summary() {
        let store = MemoryStore::new();
        let records = vec![make_test_record("a"), make_test_record("b"), make_test_record("a")];

        let summary = store.merge_all(records).unwrap();
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.duplicates, 1);
        assert!(!store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_subscribe_notified_on_insert_only() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();

        store.merge(make_test_record("a")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        store.merge(make_test_record("a")).unwrap();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_concurrent_merges_converge() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.merge(make_test_record(&i.to_string())).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 50);
        assert_eq!(store.revision(), 50);
    }
}
