//! Meeting status vocabulary and validation.

use crate::error::CoreError;

pub const MEETING_SCHEDULED: &str = "scheduled";
pub const MEETING_COMPLETED: &str = "completed";
pub const MEETING_CANCELLED: &str = "cancelled";

pub const VALID_STATUSES: &[&str] = &[MEETING_SCHEDULED, MEETING_COMPLETED, MEETING_CANCELLED];

/// Meetings last between one minute and a full day.
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

/// Default meeting length when none is supplied.
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid meeting status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

pub fn validate_duration(minutes: i32) -> Result<(), CoreError> {
    if (1..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "duration_minutes must be between 1 and {MAX_DURATION_MINUTES}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert!(validate_status(MEETING_SCHEDULED).is_ok());
        assert!(validate_status("postponed").is_err());
    }

    #[test]
    fn duration_bounds() {
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(MAX_DURATION_MINUTES).is_ok());
        assert!(validate_duration(MAX_DURATION_MINUTES + 1).is_err());
    }
}
