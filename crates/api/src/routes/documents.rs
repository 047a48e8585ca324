//! Route definitions for the `/company-documents` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Routes mounted at `/company-documents`.
///
/// ```text
/// GET    /                -> list_company
/// POST   /                -> upload_company (multipart)
/// GET    /{id}            -> get_by_id
/// GET    /{id}/download   -> download
/// DELETE /{id}            -> delete
/// ```
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_company)
                .post(documents::upload_company)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/{id}", get(documents::get_by_id).delete(documents::delete))
        .route("/{id}/download", get(documents::download))
}
