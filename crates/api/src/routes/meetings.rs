//! Route definitions for the `/meetings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Routes mounted at `/meetings`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/cancel   -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meetings::list).post(meetings::create))
        .route(
            "/{id}",
            get(meetings::get_by_id)
                .put(meetings::update)
                .delete(meetings::delete),
        )
        .route("/{id}/cancel", post(meetings::cancel))
}
