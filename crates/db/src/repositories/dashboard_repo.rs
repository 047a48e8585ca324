//! Aggregate queries behind the dashboard.

use bidtrack_core::currency::format_inr;
use bidtrack_core::finance::FINANCE_PENDING;
use bidtrack_core::not_relevant::{NR_APPROVED, NR_PENDING};
use bidtrack_core::tender::{
    STATUS_IN_PROGRESS, STATUS_PUBLISHED, STATUS_SUBMITTED, STATUS_UNDER_EVALUATION,
};
use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{DashboardStats, StatusCount};

/// Statuses whose value counts towards the open pipeline.
const PIPELINE_STATUSES: &[&str] = &[
    STATUS_PUBLISHED,
    STATUS_IN_PROGRESS,
    STATUS_SUBMITTED,
    STATUS_UNDER_EVALUATION,
];

/// Dashboard statistics.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute dashboard numbers over visible tenders.
    ///
    /// Tenders approved as not relevant are excluded. When `assignee` is
    /// set, tender figures cover only that user's assignments.
    pub async fn stats(
        pool: &PgPool,
        assignee: Option<DbId>,
    ) -> Result<DashboardStats, sqlx::Error> {
        let visible = format!(
            "(not_relevant_status IS NULL OR not_relevant_status <> '{NR_APPROVED}') \
             AND ($1::BIGINT IS NULL OR assigned_to = $1)"
        );

        let by_status = sqlx::query_as::<_, StatusCount>(&format!(
            "SELECT status, COUNT(*)::BIGINT AS count FROM tenders
             WHERE {visible}
             GROUP BY status
             ORDER BY status"
        ))
        .bind(assignee)
        .fetch_all(pool)
        .await?;

        let total_tenders = by_status.iter().map(|s| s.count).sum();

        let pipeline_statuses: Vec<String> =
            PIPELINE_STATUSES.iter().map(|s| s.to_string()).collect();
        let pipeline_value: i64 = sqlx::query_scalar(&format!(
            "SELECT COALESCE(SUM(value), 0)::BIGINT FROM tenders
             WHERE {visible} AND status = ANY($2)"
        ))
        .bind(assignee)
        .bind(&pipeline_statuses)
        .fetch_one(pool)
        .await?;

        let deadlines_next_7_days: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*)::BIGINT FROM tenders
             WHERE {visible} AND deadline >= NOW() AND deadline < NOW() + INTERVAL '7 days'"
        ))
        .bind(assignee)
        .fetch_one(pool)
        .await?;

        let pending_not_relevant: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM tenders
             WHERE not_relevant_status = $2 AND ($1::BIGINT IS NULL OR assigned_to = $1)",
        )
        .bind(assignee)
        .bind(NR_PENDING)
        .fetch_one(pool)
        .await?;

        let pending_finance_requests: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM finance_requests WHERE status = $1")
                .bind(FINANCE_PENDING)
                .fetch_one(pool)
                .await?;

        Ok(DashboardStats {
            total_tenders,
            by_status,
            pipeline_value,
            formatted_pipeline_value: format_inr(pipeline_value),
            deadlines_next_7_days,
            pending_not_relevant,
            pending_finance_requests,
        })
    }
}
