//! Dashboard aggregate models.

use bidtrack_core::types::MinorUnits;
use serde::Serialize;
use sqlx::FromRow;

/// Number of tenders in one status.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tenders: i64,
    pub by_status: Vec<StatusCount>,
    /// Sum of `value` over tenders still in play, in minor units.
    pub pipeline_value: MinorUnits,
    pub formatted_pipeline_value: String,
    pub deadlines_next_7_days: i64,
    pub pending_not_relevant: i64,
    pub pending_finance_requests: i64,
}
