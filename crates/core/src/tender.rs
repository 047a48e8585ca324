//! Tender status and source constants plus write-time validation.
//!
//! Status transitions are intentionally unconstrained: any valid status can
//! replace any other. Only the vocabulary is enforced.

use crate::error::CoreError;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_UNDER_EVALUATION: &str = "under_evaluation";
pub const STATUS_WON: &str = "won";
pub const STATUS_LOST: &str = "lost";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_MISSED_OPPORTUNITY: &str = "missed_opportunity";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PUBLISHED,
    STATUS_IN_PROGRESS,
    STATUS_SUBMITTED,
    STATUS_UNDER_EVALUATION,
    STATUS_WON,
    STATUS_LOST,
    STATUS_CANCELLED,
    STATUS_MISSED_OPPORTUNITY,
];

pub const SOURCE_GEM: &str = "gem";
pub const SOURCE_NON_GEM: &str = "non_gem";
pub const SOURCE_PORTAL: &str = "portal";
pub const SOURCE_DIRECT: &str = "direct";
pub const SOURCE_REFERRAL: &str = "referral";

pub const VALID_SOURCES: &[&str] = &[
    SOURCE_GEM,
    SOURCE_NON_GEM,
    SOURCE_PORTAL,
    SOURCE_DIRECT,
    SOURCE_REFERRAL,
];

/// Default currency code for new tenders.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Maximum length of a tender title.
pub const MAX_TITLE_LEN: usize = 500;

pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

pub fn is_valid_source(source: &str) -> bool {
    VALID_SOURCES.contains(&source)
}

/// Validate a status string supplied on write.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if is_valid_status(status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a source string supplied on write.
pub fn validate_source(source: &str) -> Result<(), CoreError> {
    if is_valid_source(source) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid source '{source}'. Must be one of: {}",
            VALID_SOURCES.join(", ")
        )))
    }
}

/// Validate that a required text field is present and within bounds.
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Normalize a currency code to upper case, rejecting anything that is not
/// three ASCII letters.
pub fn normalize_currency(currency: &str) -> Result<String, CoreError> {
    let code = currency.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "currency must be a 3-letter code, got '{currency}'"
        )));
    }
    Ok(code)
}

/// Monetary amounts may be zero (unknown) but never negative.
pub fn validate_amount(field: &str, minor_units: i64) -> Result<(), CoreError> {
    if minor_units < 0 {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Clamp a percentage (AI score, win probability) into `0..=100`.
pub fn clamp_percent(value: i32) -> i32 {
    value.clamp(0, 100)
}
