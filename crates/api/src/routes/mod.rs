pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod finance;
pub mod health;
pub mod meetings;
pub mod tenders;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current user + permissions
///
/// /users                                   list (admin, manager), create (admin)
/// /users/{id}                              get, update, deactivate (admin)
/// /users/{id}/reset-password               reset password (admin)
///
/// /tenders                                 list, create
/// /tenders/import                          spreadsheet import (multipart)
/// /tenders/not-relevant/pending            pending not-relevant queue (admin)
/// /tenders/{id}                            get, update, delete
/// /tenders/{id}/assign                     assign / unassign
/// /tenders/{id}/status                     update status (PATCH)
/// /tenders/{id}/assignments                assignment history
/// /tenders/{id}/activity                   activity log
/// /tenders/{id}/not-relevant               file a not-relevant request
/// /tenders/{id}/not-relevant/decision      approve / reject (admin)
/// /tenders/{id}/ai-score                   score via AI and persist
/// /tenders/{id}/documents                  list, upload
///
/// /company-documents                       list, upload
/// /company-documents/{id}                  get, delete
/// /company-documents/{id}/download         download file
///
/// /finance-requests                        list, create
/// /finance-requests/{id}                   get
/// /finance-requests/{id}/approve           approve (admin, finance)
/// /finance-requests/{id}/reject            reject (admin, finance)
/// /finance-requests/{id}/complete          complete (admin, finance)
///
/// /meetings                                list, create
/// /meetings/{id}                           get, update, delete
/// /meetings/{id}/cancel                    cancel
///
/// /ai/analyze-tender                       AI proxy
/// /ai/generate-bid                         AI proxy
/// /ai/pricing-suggestion                   AI proxy
/// /ai/risk-assessment                      AI proxy
///
/// /dashboard/stats                         headline numbers
/// ```
///
/// `max_upload_bytes` bounds request bodies on the multipart routes; the
/// exact per-file limit is enforced while streaming.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    let upload_limit = max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/tenders", tenders::router(upload_limit))
        .nest("/company-documents", documents::router(upload_limit))
        .nest("/finance-requests", finance::router())
        .nest("/meetings", meetings::router())
        .nest("/ai", ai::router())
        .nest("/dashboard", dashboard::router())
}
