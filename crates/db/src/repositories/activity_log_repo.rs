//! Repository for the append-only `activity_logs` table.

use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const COLUMNS: &str = "id, tender_id, user_id, action, details, created_at";

/// Append and read activity entries.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (tender_id, user_id, action, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.tender_id)
            .bind(input.user_id)
            .bind(input.action)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries for a tender, newest first.
    pub async fn list_for_tender(
        pool: &PgPool,
        tender_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE tender_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(tender_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
