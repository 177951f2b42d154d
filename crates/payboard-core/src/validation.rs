//! Draft and record validation.

use crate::error::{DraftIssue, ValidationError};
use crate::record::{PaymentDraft, PaymentRecord};

/// Collect every problem with a draft.
///
/// Checks, in form order:
/// - sender selected
/// - receiver selected
/// - sender and receiver differ (only when both are selected)
/// - amount greater than zero
pub fn draft_issues(draft: &PaymentDraft) -> Vec<DraftIssue> {
    let mut issues = Vec::new();

    if !draft.sender.is_selected() {
        issues.push(DraftIssue::SenderNotSelected);
    }

    if !draft.receiver.is_selected() {
        issues.push(DraftIssue::ReceiverNotSelected);
    }

    if draft.sender.is_selected()
        && draft.receiver.is_selected()
        && draft.sender.id == draft.receiver.id
    {
        issues.push(DraftIssue::SameUser);
    }

    if !draft.amount.is_positive() {
        issues.push(DraftIssue::NonPositiveAmount);
    }

    issues
}

/// Validate a draft before submission.
pub fn validate_draft(draft: &PaymentDraft) -> Result<(), ValidationError> {
    let issues = draft_issues(draft);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidDraft(issues))
    }
}

/// Validate a record received from the server before it is merged.
///
/// This performs:
/// - Non-empty id
/// - Positive amount
/// - Parseable ISO-8601 timestamp
pub fn validate_record(record: &PaymentRecord) -> Result<(), ValidationError> {
    // 1. Id must be present
    if record.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }

    // 2. Amount must be positive
    if !record.amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount {
            id: record.id.clone(),
            amount: record.amount.to_string(),
        });
    }

    // 3. Timestamp must parse
    record
        .parsed_timestamp()
        .map_err(|source| ValidationError::Malformed {
            id: record.id.clone(),
            source,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Currency, PaymentId, User};

    fn make_draft() -> PaymentDraft {
        PaymentDraft::empty()
            .sender(User::new(1, "Al"))
            .receiver(User::new(2, "Bo"))
            .amount(Amount::from_minor(1000))
            .currency(Currency::USD)
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&make_draft()).is_ok());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let issues = draft_issues(&PaymentDraft::empty());
        assert_eq!(
            issues,
            vec![
                DraftIssue::SenderNotSelected,
                DraftIssue::ReceiverNotSelected,
                DraftIssue::NonPositiveAmount,
            ]
        );
    }

    #[test]
    fn test_receiver_checked_independently_of_sender() {
        let draft = make_draft().receiver(User::NONE);
        assert_eq!(draft_issues(&draft), vec![DraftIssue::ReceiverNotSelected]);
    }

    #[test]
    fn test_same_user_rejected() {
        let draft = make_draft().receiver(User::new(1, "Al"));
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.draft_issues(), &[DraftIssue::SameUser]);
    }

    #[test]
    fn test_amount_rounding_to_zero_rejected() {
        let draft = make_draft().amount("0.004".parse().unwrap());
        assert_eq!(draft_issues(&draft), vec![DraftIssue::NonPositiveAmount]);
    }

    #[test]
    fn test_valid_record() {
        let record = make_draft().stamp(PaymentId::from("1"), "2024-01-02T15:04:05.000Z".into());
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_record_empty_id() {
        let record = make_draft().stamp(PaymentId::from(""), "2024-01-02T15:04:05.000Z".into());
        assert!(matches!(validate_record(&record), Err(ValidationError::EmptyId)));
    }

    #[test]
    fn test_record_zero_amount() {
        let record = make_draft()
            .amount(Amount::from_minor(0))
            .stamp(PaymentId::from("1"), "2024-01-02T15:04:05.000Z".into());
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_record_bad_timestamp() {
        let record = make_draft().stamp(PaymentId::from("1"), "not a date".into());
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::Malformed { .. })
        ));
    }
}
