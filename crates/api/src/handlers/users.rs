//! Handlers for the `/users` resource.
//!
//! Listing is open to tender managers (they pick assignees); everything
//! else requires the `admin` role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidtrack_core::error::CoreError;
use bidtrack_core::types::DbId;
use bidtrack_db::models::role::Role;
use bidtrack_db::models::user::{CreateUser, UpdateUser, UserResponse};
use bidtrack_db::repositories::{RoleRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireTenderManager};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    pub password: String,
    /// Role name, e.g. `bidder`.
    pub role: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    RequireTenderManager(_user): RequireTenderManager,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let role = params.role.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let users = UserRepo::list(&state.pool, role).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = resolve_role(&state, &input.role).await?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            full_name: input.full_name,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, role = %role.name, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from_user(&user, role.name),
        }),
    ))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_response(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot deactivate your own account".into(),
        )));
    }

    let role_id = match input.role.as_deref() {
        Some(role) => Some(resolve_role(&state, role).await?.id),
        None => None,
    };

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        full_name: input.full_name,
        role_id,
        is_active: input.is_active,
    };
    UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let user = UserRepo::find_response(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/users/{id}
///
/// Soft-deactivates the user. Returns 204 No Content.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot deactivate your own account".into(),
        )));
    }
    if UserRepo::deactivate(&state.pool, id).await? {
        tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if UserRepo::update_password(&state.pool, id, &hashed).await? {
        tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn resolve_role(state: &AppState, name: &str) -> AppResult<Role> {
    RoleRepo::find_by_name(&state.pool, name.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Unknown role '{name}'"))))
}
