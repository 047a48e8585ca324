//! Repository for the `meetings` table.

use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};

const COLUMNS: &str = "\
    id, title, agenda, tender_id, scheduled_at, duration_minutes, location, meeting_link, \
    organizer_id, attendee_ids, status, minutes, created_at, updated_at";

/// Provides CRUD operations for meetings.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Insert a new meeting organized by `organizer_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMeeting,
        organizer_id: DbId,
    ) -> Result<Meeting, sqlx::Error> {
        let query = format!(
            "INSERT INTO meetings (title, agenda, tender_id, scheduled_at, duration_minutes, \
                location, meeting_link, organizer_id, attendee_ids)
             VALUES ($1, $2, $3, $4, COALESCE($5, 60), $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(&input.title)
            .bind(&input.agenda)
            .bind(input.tender_id)
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(&input.location)
            .bind(&input.meeting_link)
            .bind(organizer_id)
            .bind(&input.attendee_ids)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meetings WHERE id = $1");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List meetings in schedule order.
    ///
    /// `upcoming` keeps only scheduled meetings that have not started yet.
    pub async fn list(
        pool: &PgPool,
        tender_id: Option<DbId>,
        upcoming: bool,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings
             WHERE ($1::BIGINT IS NULL OR tender_id = $1)
               AND (NOT $2 OR (status = 'scheduled' AND scheduled_at >= NOW()))
             ORDER BY scheduled_at ASC, id ASC"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(tender_id)
            .bind(upcoming)
            .fetch_all(pool)
            .await
    }

    /// Update a meeting. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET
                title = COALESCE($2, title),
                agenda = COALESCE($3, agenda),
                scheduled_at = COALESCE($4, scheduled_at),
                duration_minutes = COALESCE($5, duration_minutes),
                location = COALESCE($6, location),
                meeting_link = COALESCE($7, meeting_link),
                attendee_ids = COALESCE($8, attendee_ids),
                status = COALESCE($9, status),
                minutes = COALESCE($10, minutes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.agenda)
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(&input.location)
            .bind(&input.meeting_link)
            .bind(&input.attendee_ids)
            .bind(&input.status)
            .bind(&input.minutes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a meeting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
