//! Activity log action names.
//!
//! Stored verbatim in `activity_logs.action`; the frontend renders them.

pub const ACTION_TENDER_CREATED: &str = "tender.created";
pub const ACTION_TENDER_UPDATED: &str = "tender.updated";
pub const ACTION_TENDER_DELETED: &str = "tender.deleted";
pub const ACTION_TENDER_IMPORTED: &str = "tender.imported";
pub const ACTION_TENDER_ASSIGNED: &str = "tender.assigned";
pub const ACTION_STATUS_CHANGED: &str = "tender.status_changed";
pub const ACTION_AI_SCORED: &str = "tender.ai_scored";
pub const ACTION_NOT_RELEVANT_REQUESTED: &str = "tender.not_relevant_requested";
pub const ACTION_NOT_RELEVANT_DECIDED: &str = "tender.not_relevant_decided";
pub const ACTION_DOCUMENT_UPLOADED: &str = "document.uploaded";
pub const ACTION_DOCUMENT_DELETED: &str = "document.deleted";
pub const ACTION_FINANCE_REQUESTED: &str = "finance.requested";
pub const ACTION_FINANCE_DECIDED: &str = "finance.decided";
pub const ACTION_MEETING_SCHEDULED: &str = "meeting.scheduled";
