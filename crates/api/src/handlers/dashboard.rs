use axum::extract::State;
use axum::Json;
use bidtrack_db::models::dashboard::DashboardStats;
use bidtrack_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/dashboard/stats
///
/// Bidders get figures for their own assignments only.
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool, user.tender_scope()).await?;
    Ok(Json(DataResponse { data: stats }))
}
