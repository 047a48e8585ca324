//! Shared response envelope types for API handlers.
//!
//! Single resources and plain lists use a `{ "data": ... }` envelope.
//! Paginated listings use [`bidtrack_core::pagination::Paginated`], which
//! adds a `pagination` block next to `data`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
