//! Meeting model and DTOs.

use bidtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `meetings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: DbId,
    pub title: String,
    pub agenda: Option<String>,
    pub tender_id: Option<DbId>,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub organizer_id: Option<DbId>,
    pub attendee_ids: Vec<DbId>,
    pub status: String,
    pub minutes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for scheduling a meeting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeeting {
    pub title: String,
    pub agenda: Option<String>,
    pub tender_id: Option<DbId>,
    pub scheduled_at: Timestamp,
    /// Defaults to 60 if omitted.
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub attendee_ids: Vec<DbId>,
}

/// DTO for updating a meeting. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeeting {
    pub title: Option<String>,
    pub agenda: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub attendee_ids: Option<Vec<DbId>>,
    pub status: Option<String>,
    pub minutes: Option<String>,
}
