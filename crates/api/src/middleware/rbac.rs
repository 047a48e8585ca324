//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not allow the action with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bidtrack_core::error::CoreError;
use bidtrack_core::roles::{can_decide_finance, can_manage_tenders, ROLE_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `admin` or `manager`: create, edit, import and assign tenders.
pub struct RequireTenderManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireTenderManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_manage_tenders(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or Manager role required".into(),
            )));
        }
        Ok(RequireTenderManager(user))
    }
}

/// Requires `admin` or `finance`: decide and complete finance requests.
pub struct RequireFinanceApprover(pub AuthUser);

impl FromRequestParts<AppState> for RequireFinanceApprover {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_decide_finance(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or Finance role required".into(),
            )));
        }
        Ok(RequireFinanceApprover(user))
    }
}
