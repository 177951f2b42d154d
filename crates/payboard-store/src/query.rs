//! Filtering the record set into the bounded dashboard view.
//!
//! A [`FilterCriteria`] holds at most one predicate per record field.
//! [`evaluate`] keeps the records that satisfy every set predicate, in
//! snapshot order, and truncates the result to [`VIEW_LIMIT`] entries.

use payboard_core::{Currency, PaymentRecord};
use rust_decimal::Decimal;

/// Maximum number of records in a view.
pub const VIEW_LIMIT: usize = 25;

/// User-supplied field predicates. Absent or empty predicates pass everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Substring of the record id.
    pub id: Option<String>,
    /// Substring of the ISO timestamp.
    pub date: Option<String>,
    /// Substring of the sender's name.
    pub sender: Option<String>,
    /// Substring of the receiver's name.
    pub receiver: Option<String>,
    /// Inclusive lower bound on the amount.
    pub min_amount: Option<Decimal>,
    /// Inclusive upper bound on the amount.
    pub max_amount: Option<Decimal>,
    /// Exact currency.
    pub currency: Option<Currency>,
    /// Substring of the memo.
    pub memo: Option<String>,
}

impl FilterCriteria {
    /// Criteria that pass every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn sender(mut self, name: impl Into<String>) -> Self {
        self.sender = Some(name.into());
        self
    }

    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receiver = Some(name.into());
        self
    }

    pub fn min_amount(mut self, min: Decimal) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn max_amount(mut self, max: Decimal) -> Self {
        self.max_amount = Some(max);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        [&self.id, &self.date, &self.sender, &self.receiver, &self.memo]
            .iter()
            .all(|f| f.as_deref().map_or(true, str::is_empty))
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.currency.is_none()
    }

    /// Whether `record` satisfies every set predicate.
    pub fn matches(&self, record: &PaymentRecord) -> bool {
        contains(record.id.as_str(), &self.id)
            && contains(&record.timestamp, &self.date)
            && contains(&record.sender.name, &self.sender)
            && contains(&record.receiver.name, &self.receiver)
            && self.min_amount.map_or(true, |min| record.amount.value() >= min)
            && self.max_amount.map_or(true, |max| record.amount.value() <= max)
            && self.currency.map_or(true, |c| record.currency == c)
            && contains(&record.memo, &self.memo)
    }
}

/// Case-sensitive substring test; an absent or empty needle passes.
fn contains(haystack: &str, needle: &Option<String>) -> bool {
    match needle.as_deref() {
        None | Some("") => true,
        Some(needle) => haystack.contains(needle),
    }
}

/// Filter a snapshot into the dashboard view.
///
/// Order is preserved. At most [`VIEW_LIMIT`] records are returned: the
/// first ones in snapshot order that match. Later matches are dropped.
pub fn evaluate(snapshot: &[PaymentRecord], criteria: &FilterCriteria) -> Vec<PaymentRecord> {
    evaluate_with_limit(snapshot, criteria, VIEW_LIMIT)
}

/// [`evaluate`] with an explicit cap.
pub fn evaluate_with_limit(
    snapshot: &[PaymentRecord],
    criteria: &FilterCriteria,
    limit: usize,
) -> Vec<PaymentRecord> {
    snapshot
        .iter()
        .filter(|record| criteria.matches(record))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use payboard_core::{Amount, PaymentDraft, PaymentId, User};

    fn make_record(id: &str, sender: &str, cents: i64, currency: Currency) -> PaymentRecord {
        PaymentDraft::empty()
            .sender(User::new(1, sender))
            .receiver(User::new(2, "Bo"))
            .amount(Amount::from_minor(cents))
            .currency(currency)
            .memo(format!("memo {id}"))
            .stamp(PaymentId::from(id), "2024-01-02T15:04:05.000Z".into())
    }

    fn ids(records: &[PaymentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_amount_range_and_currency() {
        let snapshot = vec![make_record("A", "Al", 1000, Currency::USD)];

        let view = evaluate(
            &snapshot,
            &FilterCriteria::new()
                .min_amount(Decimal::from(5))
                .max_amount(Decimal::from(20)),
        );
        assert_eq!(ids(&view), vec!["A"]);

        let view = evaluate(&snapshot, &FilterCriteria::new().currency(Currency::BTC));
        assert!(view.is_empty());
    }

    #[test]
    fn test_amount_bounds_inclusive() {
        let snapshot = vec![make_record("A", "Al", 1000, Currency::USD)];
        let ten = Decimal::from(10);

        let view = evaluate(&snapshot, &FilterCriteria::new().min_amount(ten).max_amount(ten));
        assert_eq!(ids(&view), vec!["A"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let snapshot = vec![make_record("A", "Al", 1000, Currency::USD)];

        let view = evaluate(
            &snapshot,
            &FilterCriteria::new()
                .min_amount(Decimal::from(20))
                .max_amount(Decimal::from(5)),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_substring_is_case_sensitive() {
        let snapshot = vec![make_record("A", "Alice", 1000, Currency::USD)];

        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().sender("lic"))), vec!["A"]);
        assert!(evaluate(&snapshot, &FilterCriteria::new().sender("ALICE")).is_empty());
    }

    #[test]
    fn test_empty_string_criteria_pass() {
        let snapshot = vec![make_record("A", "Al", 1000, Currency::USD)];
        let criteria = FilterCriteria::new().id("").memo("").date("");

        assert!(criteria.is_empty());
        assert_eq!(ids(&evaluate(&snapshot, &criteria)), vec!["A"]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let snapshot = vec![
            make_record("1", "Al", 1000, Currency::USD),
            make_record("2", "Al", 1000, Currency::EUR),
            make_record("3", "Cy", 1000, Currency::USD),
        ];

        let view = evaluate(
            &snapshot,
            &FilterCriteria::new().sender("Al").currency(Currency::USD),
        );
        assert_eq!(ids(&view), vec!["1"]);
    }

    #[test]
    fn test_cap_applied_after_filter() {
        let snapshot: Vec<_> = (0..60)
            .map(|i| {
                let currency = if i % 2 == 0 { Currency::JPY } else { Currency::USD };
                make_record(&i.to_string(), "Al", 100, currency)
            })
            .collect();

        let view = evaluate(&snapshot, &FilterCriteria::new().currency(Currency::USD));
        assert_eq!(view.len(), VIEW_LIMIT);
        assert_eq!(view[0].id.as_str(), "1");
        assert_eq!(view[VIEW_LIMIT - 1].id.as_str(), "49");
    }

    #[test]
    fn test_id_substring() {
        let snapshot = vec![
            make_record("4410", "Al", 1000, Currency::USD),
            make_record("9921", "Al", 1000, Currency::USD),
        ];

        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().id("41"))), vec!["4410"]);
        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().id("92"))), vec!["9921"]);
        assert!(evaluate(&snapshot, &FilterCriteria::new().id("77")).is_empty());
    }

    #[test]
    fn test_receiver_substring() {
        let mut to_cy = make_record("2", "Al", 1000, Currency::USD);
        to_cy.receiver = User::new(3, "Cyrus");
        let snapshot = vec![make_record("1", "Al", 1000, Currency::USD), to_cy];

        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().receiver("yr"))), vec!["2"]);
        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().receiver("Bo"))), vec!["1"]);
        assert!(evaluate(&snapshot, &FilterCriteria::new().receiver("cyrus")).is_empty());
    }

    #[test]
    fn test_memo_substring() {
        let mut rent = make_record("2", "Al", 1000, Currency::USD);
        rent.memo = "March rent".into();
        let snapshot = vec![make_record("1", "Al", 1000, Currency::USD), rent];

        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().memo("rent"))), vec!["2"]);
        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().memo("memo 1"))), vec!["1"]);
        assert!(evaluate(&snapshot, &FilterCriteria::new().memo("April")).is_empty());
    }

    #[test]
    fn test_date_substring() {
        let snapshot = vec![make_record("A", "Al", 1000, Currency::USD)];
        assert_eq!(ids(&evaluate(&snapshot, &FilterCriteria::new().date("2024-01-02"))), vec!["A"]);
        assert!(evaluate(&snapshot, &FilterCriteria::new().date("2023")).is_empty());
    }
}
