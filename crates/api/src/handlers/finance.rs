//! Handlers for finance requests (EMD, PBG, tender fees).
//!
//! Requests move `pending -> approved | rejected` and `approved ->
//! completed`. Bidders only see the requests they filed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidtrack_core::activity::{ACTION_FINANCE_DECIDED, ACTION_FINANCE_REQUESTED};
use bidtrack_core::error::CoreError;
use bidtrack_core::finance::{
    validate_amount, validate_request_type, validate_transition, FINANCE_APPROVED,
    FINANCE_COMPLETED, FINANCE_REJECTED, VALID_STATUSES,
};
use bidtrack_core::pagination::{offset_for, parse_limit, parse_page, Paginated, PaginationMeta};
use bidtrack_core::types::DbId;
use bidtrack_db::models::finance_request::{
    CreateFinanceRequest, FinanceRequest, FinanceRequestFilter,
};
use bidtrack_db::repositories::FinanceRequestRepo;
use serde::Deserialize;
use serde_json::json;

use super::record_activity;
use super::tenders::load_visible;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireFinanceApprover;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /finance-requests`. Everything is parsed
/// leniently, like the tender listing: malformed values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceListParams {
    pub status: Option<String>,
    pub tender_id: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Optional body for approve, reject and complete.
#[derive(Debug, Default, Deserialize)]
pub struct DecisionBody {
    pub remarks: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/finance-requests
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<FinanceListParams>,
) -> AppResult<Json<Paginated<FinanceRequest>>> {
    let filter = FinanceRequestFilter {
        status: params
            .status
            .filter(|s| VALID_STATUSES.contains(&s.as_str())),
        tender_id: params
            .tender_id
            .as_deref()
            .and_then(|id| id.trim().parse::<DbId>().ok()),
        request_type: params
            .request_type
            .filter(|t| validate_request_type(t).is_ok()),
        requested_by: user.tender_scope(),
    };
    let page = parse_page(params.page.as_deref());
    let limit = parse_limit(params.limit.as_deref());

    let total = FinanceRequestRepo::count(&state.pool, &filter).await?;
    let rows =
        FinanceRequestRepo::list(&state.pool, &filter, limit, offset_for(page, limit)).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PaginationMeta::new(page, limit, total),
    }))
}

/// POST /api/finance-requests
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateFinanceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FinanceRequest>>)> {
    input.request_type = input.request_type.trim().to_lowercase();
    validate_request_type(&input.request_type)?;
    validate_amount(input.amount)?;
    input.remarks = input
        .remarks
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    load_visible(&state, &user, input.tender_id).await?;

    let request = FinanceRequestRepo::create(&state.pool, &input, user.user_id).await?;
    tracing::info!(
        finance_request_id = request.id,
        tender_id = request.tender_id,
        user_id = user.user_id,
        request_type = %request.request_type,
        "Finance request filed",
    );
    record_activity(
        &state,
        Some(request.tender_id),
        user.user_id,
        ACTION_FINANCE_REQUESTED,
        json!({
            "financeRequestId": request.id,
            "type": request.request_type,
            "amount": request.amount,
        }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/finance-requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<FinanceRequest>>> {
    let request = FinanceRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if let Some(own) = user.tender_scope() {
        if request.requested_by != Some(own) {
            return Err(not_found(id));
        }
    }
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/finance-requests/{id}/approve
pub async fn approve(
    state: State<AppState>,
    approver: RequireFinanceApprover,
    id: Path<DbId>,
    body: Option<Json<DecisionBody>>,
) -> AppResult<Json<DataResponse<FinanceRequest>>> {
    decide(state, approver, id, body, FINANCE_APPROVED).await
}

/// POST /api/finance-requests/{id}/reject
pub async fn reject(
    state: State<AppState>,
    approver: RequireFinanceApprover,
    id: Path<DbId>,
    body: Option<Json<DecisionBody>>,
) -> AppResult<Json<DataResponse<FinanceRequest>>> {
    decide(state, approver, id, body, FINANCE_REJECTED).await
}

/// POST /api/finance-requests/{id}/complete
pub async fn complete(
    state: State<AppState>,
    approver: RequireFinanceApprover,
    id: Path<DbId>,
    body: Option<Json<DecisionBody>>,
) -> AppResult<Json<DataResponse<FinanceRequest>>> {
    decide(state, approver, id, body, FINANCE_COMPLETED).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "FinanceRequest",
        id,
    })
}

async fn decide(
    State(state): State<AppState>,
    RequireFinanceApprover(approver): RequireFinanceApprover,
    Path(id): Path<DbId>,
    body: Option<Json<DecisionBody>>,
    target: &'static str,
) -> AppResult<Json<DataResponse<FinanceRequest>>> {
    let current = FinanceRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    validate_transition(&current.status, target)?;

    let remarks = body
        .and_then(|Json(b)| b.remarks)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let updated = FinanceRequestRepo::transition(
        &state.pool,
        id,
        &current.status,
        target,
        approver.user_id,
        remarks.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Finance request was changed by another user".into(),
        ))
    })?;

    tracing::info!(
        finance_request_id = id,
        user_id = approver.user_id,
        from = %current.status,
        to = target,
        "Finance request transitioned",
    );
    record_activity(
        &state,
        Some(updated.tender_id),
        approver.user_id,
        ACTION_FINANCE_DECIDED,
        json!({ "financeRequestId": id, "from": current.status, "to": target }),
    )
    .await;

    Ok(Json(DataResponse { data: updated }))
}
