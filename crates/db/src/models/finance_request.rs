//! Finance request (EMD, PBG, fees) model and DTOs.

use bidtrack_core::types::{DbId, MinorUnits, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `finance_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRequest {
    pub id: DbId,
    pub tender_id: DbId,
    pub request_type: String,
    pub amount: MinorUnits,
    pub status: String,
    pub requested_by: Option<DbId>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub remarks: Option<String>,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a finance request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFinanceRequest {
    pub tender_id: DbId,
    pub request_type: String,
    pub amount: MinorUnits,
    pub remarks: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// Listing filters. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct FinanceRequestFilter {
    pub status: Option<String>,
    pub tender_id: Option<DbId>,
    pub request_type: Option<String>,
    /// Restrict to requests filed by this user.
    pub requested_by: Option<DbId>,
}
