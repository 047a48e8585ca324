//! Route definitions for the `/tenders` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{ai, documents, import, not_relevant, tenders};
use crate::state::AppState;

/// Routes mounted at `/tenders`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// POST   /import                      -> import_tenders (multipart)
/// GET    /not-relevant/pending        -> not_relevant::pending
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// POST   /{id}/assign                 -> assign
/// PATCH  /{id}/status                 -> update_status
/// GET    /{id}/assignments            -> assignments
/// GET    /{id}/activity               -> activity
/// POST   /{id}/not-relevant           -> not_relevant::request
/// POST   /{id}/not-relevant/decision  -> not_relevant::decide
/// POST   /{id}/ai-score               -> ai::score_tender
/// GET    /{id}/documents              -> documents::list_for_tender
/// POST   /{id}/documents              -> documents::upload_for_tender (multipart)
/// ```
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(tenders::list).post(tenders::create))
        .route(
            "/import",
            post(import::import_tenders).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/not-relevant/pending", get(not_relevant::pending))
        .route(
            "/{id}",
            get(tenders::get_by_id)
                .put(tenders::update)
                .delete(tenders::delete),
        )
        .route("/{id}/assign", post(tenders::assign))
        .route("/{id}/status", patch(tenders::update_status))
        .route("/{id}/assignments", get(tenders::assignments))
        .route("/{id}/activity", get(tenders::activity))
        .route("/{id}/not-relevant", post(not_relevant::request))
        .route("/{id}/not-relevant/decision", post(not_relevant::decide))
        .route("/{id}/ai-score", post(ai::score_tender))
        .route(
            "/{id}/documents",
            get(documents::list_for_tender)
                .post(documents::upload_for_tender)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
}
