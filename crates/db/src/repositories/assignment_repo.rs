//! Repository for the `tender_assignments` history table.

use bidtrack_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::assignment::TenderAssignment;

const COLUMNS: &str = "id, tender_id, assigned_to, assigned_by, note, created_at, updated_at";

/// Append and read tender assignment history.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Append a history row. Takes a connection so callers can run it inside
    /// the transaction that changes `tenders.assigned_to`.
    pub async fn record(
        conn: &mut PgConnection,
        tender_id: DbId,
        assigned_to: Option<DbId>,
        assigned_by: Option<DbId>,
        note: Option<&str>,
    ) -> Result<TenderAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO tender_assignments (tender_id, assigned_to, assigned_by, note)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TenderAssignment>(&query)
            .bind(tender_id)
            .bind(assigned_to)
            .bind(assigned_by)
            .bind(note)
            .fetch_one(conn)
            .await
    }

    /// Assignment history for a tender, newest first.
    pub async fn list_for_tender(
        pool: &PgPool,
        tender_id: DbId,
    ) -> Result<Vec<TenderAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tender_assignments
             WHERE tender_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TenderAssignment>(&query)
            .bind(tender_id)
            .fetch_all(pool)
            .await
    }
}
