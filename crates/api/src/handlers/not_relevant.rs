//! Not-relevant approval workflow: request, decide, pending queue.
//!
//! Both write paths validate against the current row first for precise
//! error messages, then rely on the repository's guarded update. A guarded
//! update that matches nothing means another request won the race, which
//! is reported as a conflict.

use axum::extract::{Path, State};
use axum::Json;
use bidtrack_core::activity::{ACTION_NOT_RELEVANT_DECIDED, ACTION_NOT_RELEVANT_REQUESTED};
use bidtrack_core::error::CoreError;
use bidtrack_core::not_relevant::{validate_decision, validate_request};
use bidtrack_core::types::DbId;
use bidtrack_db::models::tender::TenderResponse;
use bidtrack_db::repositories::TenderRepo;
use serde::Deserialize;
use serde_json::json;

use super::record_activity;
use super::tenders::{load_visible, not_found};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NotRelevantRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: String,
    pub comments: Option<String>,
}

/// POST /api/tenders/{id}/not-relevant
pub async fn request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<NotRelevantRequest>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    let tender = load_visible(&state, &user, id).await?;
    validate_request(tender.not_relevant_status.as_deref(), &input.reason)?;

    let reason = input.reason.trim();
    let tender = TenderRepo::request_not_relevant(&state.pool, id, user.user_id, reason)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "A not-relevant request is already open for this tender".into(),
            ))
        })?;

    tracing::info!(tender_id = id, user_id = user.user_id, "Not-relevant requested");
    record_activity(
        &state,
        Some(id),
        user.user_id,
        ACTION_NOT_RELEVANT_REQUESTED,
        json!({ "reason": reason }),
    )
    .await;

    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// POST /api/tenders/{id}/not-relevant/decision
///
/// Approval hides the tender from default listings and releases its
/// assignment. Rejection only records the decision.
pub async fn decide(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<DataResponse<TenderResponse>>> {
    let tender = TenderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    let decision = validate_decision(tender.not_relevant_status.as_deref(), &input.decision)?;

    let comments = input
        .comments
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let tender = TenderRepo::decide_not_relevant(&state.pool, id, admin.user_id, decision, comments)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "No pending not-relevant request for this tender".into(),
            ))
        })?;

    tracing::info!(tender_id = id, user_id = admin.user_id, decision, "Not-relevant decided");
    record_activity(
        &state,
        Some(id),
        admin.user_id,
        ACTION_NOT_RELEVANT_DECIDED,
        json!({ "decision": decision, "comments": comments }),
    )
    .await;

    Ok(Json(DataResponse {
        data: tender.into(),
    }))
}

/// GET /api/tenders/not-relevant/pending
pub async fn pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<TenderResponse>>>> {
    let tenders = TenderRepo::list_pending_not_relevant(&state.pool).await?;
    Ok(Json(DataResponse {
        data: tenders.into_iter().map(TenderResponse::from).collect(),
    }))
}
