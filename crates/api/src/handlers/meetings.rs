//! Handlers for the `/meetings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidtrack_core::activity::ACTION_MEETING_SCHEDULED;
use bidtrack_core::error::CoreError;
use bidtrack_core::meeting::{
    validate_duration, validate_status, DEFAULT_DURATION_MINUTES, MEETING_CANCELLED,
};
use bidtrack_core::roles::can_manage_tenders;
use bidtrack_core::tender::validate_required_text;
use bidtrack_core::types::DbId;
use bidtrack_db::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use bidtrack_db::repositories::MeetingRepo;
use serde::Deserialize;
use serde_json::json;

use super::record_activity;
use super::tenders::load_visible;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_MEETING_TITLE_LEN: usize = 300;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingListParams {
    pub tender_id: Option<DbId>,
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /api/meetings
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MeetingListParams>,
) -> AppResult<Json<DataResponse<Vec<Meeting>>>> {
    if let Some(tender_id) = params.tender_id {
        load_visible(&state, &user, tender_id).await?;
    }
    let meetings = MeetingRepo::list(&state.pool, params.tender_id, params.upcoming).await?;
    Ok(Json(DataResponse { data: meetings }))
}

/// POST /api/meetings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateMeeting>,
) -> AppResult<(StatusCode, Json<DataResponse<Meeting>>)> {
    input.title = input.title.trim().to_string();
    validate_required_text("title", &input.title, MAX_MEETING_TITLE_LEN)?;
    let duration = input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate_duration(duration)?;
    input.duration_minutes = Some(duration);

    if let Some(tender_id) = input.tender_id {
        load_visible(&state, &user, tender_id).await?;
    }
    input.attendee_ids.sort_unstable();
    input.attendee_ids.dedup();

    let meeting = MeetingRepo::create(&state.pool, &input, user.user_id).await?;
    tracing::info!(meeting_id = meeting.id, user_id = user.user_id, "Meeting scheduled");
    record_activity(
        &state,
        meeting.tender_id,
        user.user_id,
        ACTION_MEETING_SCHEDULED,
        json!({ "meetingId": meeting.id, "scheduledAt": meeting.scheduled_at }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: meeting })))
}

/// GET /api/meetings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: meeting }))
}

/// PUT /api/meetings/{id}
///
/// Only the organizer or a tender manager may change a meeting.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMeeting>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    load_editable(&state, &user, id).await?;

    if let Some(ref mut title) = input.title {
        *title = title.trim().to_string();
        validate_required_text("title", title, MAX_MEETING_TITLE_LEN)?;
    }
    if let Some(minutes) = input.duration_minutes {
        validate_duration(minutes)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }

    let meeting = MeetingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    tracing::info!(meeting_id = id, user_id = user.user_id, "Meeting updated");
    Ok(Json(DataResponse { data: meeting }))
}

/// POST /api/meetings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let current = load_editable(&state, &user, id).await?;
    if current.status == MEETING_CANCELLED {
        return Err(AppError::Core(CoreError::Conflict(
            "Meeting is already cancelled".into(),
        )));
    }

    let input = UpdateMeeting {
        status: Some(MEETING_CANCELLED.to_string()),
        ..Default::default()
    };
    let meeting = MeetingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    tracing::info!(meeting_id = id, user_id = user.user_id, "Meeting cancelled");
    Ok(Json(DataResponse { data: meeting }))
}

/// DELETE /api/meetings/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_editable(&state, &user, id).await?;
    if !MeetingRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(meeting_id = id, user_id = user.user_id, "Meeting deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Meeting",
        id,
    })
}

async fn load_editable(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Meeting> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if meeting.organizer_id != Some(user.user_id) && !can_manage_tenders(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the organizer or a manager can change this meeting".into(),
        )));
    }
    Ok(meeting)
}
