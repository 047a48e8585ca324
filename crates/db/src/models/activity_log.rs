//! Activity log model.

use bidtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub tender_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an activity entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub tender_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub action: &'static str,
    pub details: serde_json::Value,
}
