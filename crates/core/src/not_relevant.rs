//! Not-relevant approval sub-workflow.
//!
//! A user files a request (status `pending`); an admin approves or rejects
//! it. Rejection leaves the tender untouched apart from the approval status,
//! and a fresh request can be filed afterwards.

use crate::error::CoreError;

pub const NR_PENDING: &str = "pending";
pub const NR_APPROVED: &str = "approved";
pub const NR_REJECTED: &str = "rejected";

/// Decisions an admin may record.
pub const VALID_DECISIONS: &[&str] = &[NR_APPROVED, NR_REJECTED];

/// Maximum length of the free-text reason.
pub const MAX_REASON_LEN: usize = 2000;

/// Check that a new request may be filed given the current approval status.
pub fn validate_request(current: Option<&str>, reason: &str) -> Result<(), CoreError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CoreError::Validation("reason is required".into()));
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(CoreError::Validation(format!(
            "reason must be at most {MAX_REASON_LEN} characters"
        )));
    }
    match current {
        Some(NR_PENDING) => Err(CoreError::Conflict(
            "A not-relevant request is already pending for this tender".into(),
        )),
        Some(NR_APPROVED) => Err(CoreError::Conflict(
            "Tender is already marked not relevant".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate a decision against the current approval status, returning the
/// canonical decision string.
pub fn validate_decision(current: Option<&str>, decision: &str) -> Result<&'static str, CoreError> {
    let decision = VALID_DECISIONS
        .iter()
        .copied()
        .find(|d| *d == decision.trim())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid decision '{decision}'. Must be one of: {}",
                VALID_DECISIONS.join(", ")
            ))
        })?;

    if current != Some(NR_PENDING) {
        return Err(CoreError::Conflict(
            "No pending not-relevant request for this tender".into(),
        ));
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn first_request_is_allowed() {
        assert!(validate_request(None, "Outside our service area").is_ok());
    }

    #[test]
    fn request_after_rejection_is_allowed() {
        assert!(validate_request(Some(NR_REJECTED), "Try again").is_ok());
    }

    #[test]
    fn duplicate_pending_request_conflicts() {
        assert_matches!(
            validate_request(Some(NR_PENDING), "again"),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn approved_tender_cannot_be_requested_again() {
        assert_matches!(
            validate_request(Some(NR_APPROVED), "again"),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn blank_reason_is_invalid() {
        assert_matches!(validate_request(None, "  "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn decision_requires_pending() {
        assert_matches!(
            validate_decision(None, NR_APPROVED),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_decision(Some(NR_REJECTED), NR_APPROVED),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn decision_vocabulary_is_checked_first() {
        assert_matches!(
            validate_decision(Some(NR_PENDING), "maybe"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn pending_request_can_be_decided() {
        assert_eq!(
            validate_decision(Some(NR_PENDING), " rejected ").unwrap(),
            NR_REJECTED
        );
        assert_eq!(
            validate_decision(Some(NR_PENDING), NR_APPROVED).unwrap(),
            NR_APPROVED
        );
    }
}
