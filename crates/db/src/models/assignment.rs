//! Tender assignment history model.

use bidtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tender_assignments` table. `assigned_to = None`
/// records that the tender was released.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderAssignment {
    pub id: DbId,
    pub tender_id: DbId,
    pub assigned_to: Option<DbId>,
    pub assigned_by: Option<DbId>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
