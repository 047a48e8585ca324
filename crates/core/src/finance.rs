//! Finance request vocabulary and status transitions.
//!
//! Requests move `pending -> approved | rejected` and `approved -> completed`.
//! Nothing else is allowed.

use crate::error::CoreError;

pub const TYPE_EMD: &str = "emd";
pub const TYPE_PBG: &str = "pbg";
pub const TYPE_TENDER_FEE: &str = "tender_fee";
pub const TYPE_SECURITY_DEPOSIT: &str = "security_deposit";
pub const TYPE_OTHER: &str = "other";

pub const VALID_TYPES: &[&str] = &[
    TYPE_EMD,
    TYPE_PBG,
    TYPE_TENDER_FEE,
    TYPE_SECURITY_DEPOSIT,
    TYPE_OTHER,
];

pub const FINANCE_PENDING: &str = "pending";
pub const FINANCE_APPROVED: &str = "approved";
pub const FINANCE_REJECTED: &str = "rejected";
pub const FINANCE_COMPLETED: &str = "completed";

pub const VALID_STATUSES: &[&str] = &[
    FINANCE_PENDING,
    FINANCE_APPROVED,
    FINANCE_REJECTED,
    FINANCE_COMPLETED,
];

pub fn validate_request_type(request_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&request_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid request type '{request_type}'. Must be one of: {}",
            VALID_TYPES.join(", ")
        )))
    }
}

/// Finance amounts must be strictly positive.
pub fn validate_amount(minor_units: i64) -> Result<(), CoreError> {
    if minor_units <= 0 {
        return Err(CoreError::Validation("amount must be greater than zero".into()));
    }
    Ok(())
}

/// Check that `current -> target` is an allowed transition.
pub fn validate_transition(current: &str, target: &str) -> Result<(), CoreError> {
    let allowed = matches!(
        (current, target),
        (FINANCE_PENDING, FINANCE_APPROVED)
            | (FINANCE_PENDING, FINANCE_REJECTED)
            | (FINANCE_APPROVED, FINANCE_COMPLETED)
    );
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move finance request from '{current}' to '{target}'"
        )))
    }
}
