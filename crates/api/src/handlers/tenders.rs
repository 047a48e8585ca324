//! Handlers for the `/tenders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidtrack_core::activity::{
    ACTION_STATUS_CHANGED, ACTION_TENDER_ASSIGNED, ACTION_TENDER_CREATED, ACTION_TENDER_DELETED,
    ACTION_TENDER_UPDATED,
};
use bidtrack_core::error::CoreError;
use bidtrack_core::pagination::{Paginated, PaginationMeta};
use bidtrack_core::roles::can_manage_tenders;
use bidtrack_core::tender::{
    clamp_percent, normalize_currency, validate_amount, validate_required_text, validate_source,
    validate_status, MAX_TITLE_LEN,
};
use bidtrack_core::tender_query::{TenderQuery, TenderQueryParams};
use bidtrack_core::types::DbId;
use bidtrack_db::models::activity_log::ActivityLog;
use bidtrack_db::models::assignment::TenderAssignment;
use bidtrack_db::models::tender::{CreateTender, Tender, TenderResponse, UpdateTender};
use bidtrack_db::repositories::{
    ActivityLogRepo, AssignmentRepo, DocumentRepo, TenderRepo, UserRepo,
};
use serde::Deserialize;
use serde_json::json;

use super::record_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireTenderManager};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::remove_stored;

/// Longest organization name accepted.
const MAX_ORGANIZATION_LEN: usize = 300;

/// Default and maximum number of activity entries returned.
const DEFAULT_ACTIVITY_LIMIT: i64 = 50;
const MAX_ACTIVITY_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tenders/{id}/assign`. A null `userId` unassigns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub user_id: Option<DbId>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tenders
///
/// Filtered, sorted and paginated listing. Malformed parameters fall back
/// to defaults rather than failing. Bidders only see their own assignments.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TenderQueryParams>,
) -> AppResult<Json<Paginated<TenderResponse>>> {
    let mut query = TenderQuery::from_params(&params);
    if let Some(assignee) = user.tender_scope() {
        query.restrict_to_assignee(assignee);
    }

    let total = TenderRepo::count(&state.pool, &query).await?;
    let rows = TenderRepo::list(&state.pool, &query).await?;

    Ok(Json(Paginated {
        data: rows.into_iter().map(TenderResponse::from).collect(),
        pagination: PaginationMeta::new(query.page, query.limit, total),
    }))
}

/// POST /api/tenders
pub async fn create(
    State(state): State<AppState>,
    RequireTenderManager(user): RequireTenderManager,
    Json(mut input): Json<CreateTender>,
) -> AppResult<(StatusCode, Json<DataResponse<TenderResponse>>)> {
    validate_create(&mut input)?;

    let tender = TenderRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(tender_id = tender.id, user_id = user.user_id, "Tender created");
    record_activity(
        &state,
        Some(tender.id),
        user.user_id,
        ACTION_TENDER_CREATED,
        json!({ "title": tender.title }),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: tender.into(),
        }),
    ))
}

/// GET /api/tenders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    let tender = load_visible(&state, &user, id).await?;
    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// PUT /api/tenders/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireTenderManager(user): RequireTenderManager,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTender>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    validate_update(&mut input)?;

    let tender = TenderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    tracing::info!(tender_id = id, user_id = user.user_id, "Tender updated");
    record_activity(&state, Some(id), user.user_id, ACTION_TENDER_UPDATED, json!({})).await;

    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// DELETE /api/tenders/{id}
///
/// Hard delete. Attached documents are removed with the tender, including
/// their files. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let documents = DocumentRepo::list_for_tender(&state.pool, id).await?;

    if !TenderRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    for doc in &documents {
        remove_stored(&state.config, &doc.stored_name).await;
    }

    tracing::info!(tender_id = id, user_id = admin.user_id, "Tender deleted");
    record_activity(
        &state,
        None,
        admin.user_id,
        ACTION_TENDER_DELETED,
        json!({ "tenderId": id, "documentsRemoved": documents.len() }),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tenders/{id}/assign
pub async fn assign(
    State(state): State<AppState>,
    RequireTenderManager(user): RequireTenderManager,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    if let Some(assignee) = input.user_id {
        if !UserRepo::is_active(&state.pool, assignee).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "User {assignee} does not exist or is inactive"
            ))));
        }
    }

    let note = input.note.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let tender = TenderRepo::assign(&state.pool, id, input.user_id, user.user_id, note)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(tender_id = id, assigned_to = ?input.user_id, user_id = user.user_id, "Tender assigned");
    record_activity(
        &state,
        Some(id),
        user.user_id,
        ACTION_TENDER_ASSIGNED,
        json!({ "assignedTo": input.user_id, "note": note }),
    )
    .await;

    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// PATCH /api/tenders/{id}/status
///
/// Any valid status may be set; there is no transition graph. Allowed for
/// tender managers and for the tender's current assignee.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    let status = input.status.trim();
    validate_status(status)?;

    let current = load_visible(&state, &user, id).await?;
    if !can_manage_tenders(&user.role)
        && current.assigned_to != Some(user.user_id)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only managers or the assigned bidder may change the status".into(),
        )));
    }

    let tender = TenderRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(tender_id = id, from = %current.status, to = %status, user_id = user.user_id, "Tender status changed");
    record_activity(
        &state,
        Some(id),
        user.user_id,
        ACTION_STATUS_CHANGED,
        json!({ "from": current.status, "to": status }),
    )
    .await;

    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// GET /api/tenders/{id}/assignments
pub async fn assignments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TenderAssignment>>>> {
    load_visible(&state, &user, id).await?;
    let history = AssignmentRepo::list_for_tender(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/tenders/{id}/activity
pub async fn activity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityLog>>>> {
    load_visible(&state, &user, id).await?;
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);
    let entries = ActivityLogRepo::list_for_tender(&state.pool, id, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Tender",
        id,
    })
}

/// Load a tender the caller is allowed to see.
///
/// Tenders outside a bidder's assignments are reported as missing rather
/// than forbidden.
pub(crate) async fn load_visible(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Tender> {
    let tender = TenderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if let Some(scope) = user.tender_scope() {
        if tender.assigned_to != Some(scope) {
            return Err(not_found(id));
        }
    }
    Ok(tender)
}

fn normalize_currency_field(currency: &mut Option<String>) -> Result<(), CoreError> {
    if let Some(c) = currency.as_mut() {
        *c = normalize_currency(c)?;
    }
    Ok(())
}

fn validate_amounts(
    value: Option<i64>,
    estimated_value: Option<i64>,
    emd_amount: Option<i64>,
) -> Result<(), CoreError> {
    for (field, amount) in [
        ("value", value),
        ("estimatedValue", estimated_value),
        ("emdAmount", emd_amount),
    ] {
        if let Some(a) = amount {
            validate_amount(field, a)?;
        }
    }
    Ok(())
}

/// Check a create body and normalize it in place.
fn validate_create(input: &mut CreateTender) -> Result<(), CoreError> {
    validate_required_text("title", &input.title, MAX_TITLE_LEN)?;
    validate_required_text("organization", &input.organization, MAX_ORGANIZATION_LEN)?;
    input.title = input.title.trim().to_string();
    input.organization = input.organization.trim().to_string();

    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref source) = input.source {
        validate_source(source)?;
    }
    validate_amounts(input.value, input.estimated_value, input.emd_amount)?;
    normalize_currency_field(&mut input.currency)?;
    input.win_probability = input.win_probability.map(clamp_percent);
    Ok(())
}

/// Check an update body and normalize it in place.
fn validate_update(input: &mut UpdateTender) -> Result<(), CoreError> {
    if let Some(ref mut title) = input.title {
        validate_required_text("title", title, MAX_TITLE_LEN)?;
        *title = title.trim().to_string();
    }
    if let Some(ref mut organization) = input.organization {
        validate_required_text("organization", organization, MAX_ORGANIZATION_LEN)?;
        *organization = organization.trim().to_string();
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref source) = input.source {
        validate_source(source)?;
    }
    validate_amounts(input.value, input.estimated_value, input.emd_amount)?;
    normalize_currency_field(&mut input.currency)?;
    input.win_probability = input.win_probability.map(clamp_percent);
    Ok(())
}
