//! Proptest generators for property-based testing.

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;

use payboard_core::{format_timestamp, Amount, Currency, PaymentDraft, PaymentId, PaymentRecord, User};
use payboard_store::FilterCriteria;

use crate::fixtures::fixture_epoch;

/// Generate a Currency.
pub fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Generate a positive amount in minor units.
pub fn minor_units() -> impl Strategy<Value = i64> {
    1i64..=100_000
}

/// Generate a short user name from a small alphabet, so substring filters
/// hit often.
pub fn user_name() -> impl Strategy<Value = String> {
    "[abc]{1,4}".prop_map(String::from)
}

/// Generate a short memo, possibly empty.
pub fn memo() -> impl Strategy<Value = String> {
    "[xyz ]{0,5}".prop_map(String::from)
}

/// Generate an id from a small pool, so duplicates are common.
pub fn pooled_id() -> impl Strategy<Value = String> {
    (0u8..40).prop_map(|n| format!("{n:02}"))
}

/// Parameters for generating a record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub cents: i64,
    pub currency: Currency,
    pub offset_seconds: i64,
    pub memo: String,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            pooled_id(),
            user_name(),
            user_name(),
            minor_units(),
            currency(),
            0i64..=2 * 86_400, // two days
            memo(),
        )
            .prop_map(
                |(id, sender, receiver, cents, currency, offset_seconds, memo)| RecordParams {
                    id,
                    sender,
                    receiver,
                    cents,
                    currency,
                    offset_seconds,
                    memo,
                },
            )
            .boxed()
    }
}

/// Generate a record from parameters.
pub fn record_from_params(params: &RecordParams) -> PaymentRecord {
    let at = fixture_epoch() + Duration::seconds(params.offset_seconds);
    PaymentDraft::empty()
        .sender(User::new(1, params.sender.clone()))
        .receiver(User::new(2, params.receiver.clone()))
        .amount(Amount::from_minor(params.cents))
        .currency(params.currency)
        .memo(params.memo.clone())
        .stamp(PaymentId::from(params.id.as_str()), format_timestamp(at))
}

/// Generate a batch of records, with repeated ids likely.
pub fn records(max_len: usize) -> impl Strategy<Value = Vec<PaymentRecord>> {
    prop::collection::vec(any::<RecordParams>(), 0..=max_len)
        .prop_map(|params| params.iter().map(record_from_params).collect())
}

/// Generate filter criteria with each predicate independently present.
pub fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of("[0-9]{1,2}"),
        prop::option::of("(2024-01-0[234]|T1[5-9]|:0[0-9])"),
        prop::option::of("[abc]{1,2}"),
        prop::option::of("[abc]{1,2}"),
        prop::option::of(0i64..=100_000),
        prop::option::of(0i64..=100_000),
        prop::option::of(currency()),
        prop::option::of("[xyz]{1,2}"),
    )
        .prop_map(
            |(id, date, sender, receiver, min, max, currency, memo)| FilterCriteria {
                id,
                date,
                sender,
                receiver,
                min_amount: min.map(|m| Decimal::new(m, 2)),
                max_amount: max.map(|m| Decimal::new(m, 2)),
                currency,
                memo,
            },
        )
}

/// First occurrence of each id, in input order.
pub fn first_occurrences(records: &[PaymentRecord]) -> Vec<PaymentRecord> {
    let mut seen = std::collections::HashSet::<PaymentId>::new();
    records
        .iter()
        .filter(|r| seen.insert(r.id.clone()))
        .cloned()
        .collect()
}

/// Amount generator over the public type.
pub fn amount() -> impl Strategy<Value = Amount> {
    minor_units().prop_map(Amount::from_minor)
}
