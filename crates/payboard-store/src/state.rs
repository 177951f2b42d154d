//! The store's state value and the actions that change it.
//!
//! [`StoreState`] is plain data: an ordered, duplicate-free sequence of
//! records, newest first. Every change goes through [`StoreState::apply`]
//! with a [`StoreAction`], so the set of possible mutations is closed.

use std::collections::{HashSet, VecDeque};

use payboard_core::{PaymentId, PaymentRecord};

/// Mutations accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Merge one record (first writer wins).
    Merge(PaymentRecord),
}

/// Result of merging a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeResult {
    /// Record was new and is now at the front.
    Inserted,
    /// A record with this id was already present (idempotent, not an error).
    AlreadyExists,
}

impl MergeResult {
    /// Whether the merge changed the state.
    pub fn is_inserted(self) -> bool {
        matches!(self, MergeResult::Inserted)
    }
}

/// Ordered sequence of records, newest-merged first, unique by id.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Records, most recently inserted at the front.
    records: VecDeque<PaymentRecord>,
    /// Ids present in `records`.
    ids: HashSet<PaymentId>,
}

impl StoreState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    pub fn apply(&mut self, action: StoreAction) -> MergeResult {
        match action {
            StoreAction::Merge(record) => self.merge(record),
        }
    }

    fn merge(&mut self, record: PaymentRecord) -> MergeResult {
        if !self.ids.insert(record.id.clone()) {
            return MergeResult::AlreadyExists;
        }
        self.records.push_front(record);
        MergeResult::Inserted
    }

    /// Records in order, newest first.
    pub fn records(&self) -> impl Iterator<Item = &PaymentRecord> {
        self.records.iter()
    }

    /// Copy the records out, newest first.
    pub fn to_vec(&self) -> Vec<PaymentRecord> {
        self.records.iter().cloned().collect()
    }

    /// Whether a record with this id is present.
    pub fn contains(&self, id: &PaymentId) -> bool {
        self.ids.contains(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the state holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payboard_core::{Amount, Currency, PaymentDraft, User};

    fn make_record(id: &str, memo: &str) -> PaymentRecord {
        PaymentDraft::empty()
            .sender(User::new(1, "Al"))
            .receiver(User::new(2, "Bo"))
            .amount(Amount::from_minor(100))
            .currency(Currency::GBP)
            .memo(memo)
            .stamp(PaymentId::from(id), "2024-01-02T15:04:05.000Z".into())
    }

    #[test]
    fn test_merge_inserts_at_front() {
        let mut state = StoreState::new();
        state.apply(StoreAction::Merge(make_record("a", "")));
        state.apply(StoreAction::Merge(make_record("b", "")));

        let ids: Vec<_> = state.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_merge_first_writer_wins() {
        let mut state = StoreState::new();
        let first = state.apply(StoreAction::Merge(make_record("a", "first")));
        let second = state.apply(StoreAction::Merge(make_record("a", "second")));

        assert_eq!(first, MergeResult::Inserted);
        assert_eq!(second, MergeResult::AlreadyExists);
        assert_eq!(state.len(), 1);
        assert!(first.is_inserted());
        assert!(!second.is_inserted());
        let stored: Vec<_> = state.records().map(|r| r.memo.as_str()).collect();
        assert_eq!(stored, vec!["first"]);
    }

    #[test]
    fn test_duplicate_does_not_reorder() {
        let mut state = StoreState::new();
        state.apply(StoreAction::Merge(make_record("a", "")));
        state.apply(StoreAction::Merge(make_record("b", "")));
        state.apply(StoreAction::Merge(make_record("a", "")));

        let ids: Vec<_> = state.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
