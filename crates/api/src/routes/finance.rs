//! Route definitions for the `/finance-requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::finance;
use crate::state::AppState;

/// Routes mounted at `/finance-requests`.
///
/// ```text
/// GET  /                -> list
/// POST /                -> create
/// GET  /{id}            -> get_by_id
/// POST /{id}/approve    -> approve (admin, finance)
/// POST /{id}/reject     -> reject (admin, finance)
/// POST /{id}/complete   -> complete (admin, finance)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(finance::list).post(finance::create))
        .route("/{id}", get(finance::get_by_id))
        .route("/{id}/approve", post(finance::approve))
        .route("/{id}/reject", post(finance::reject))
        .route("/{id}/complete", post(finance::complete))
}
