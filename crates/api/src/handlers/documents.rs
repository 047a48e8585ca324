//! Handlers for company documents and documents attached to a tender.
//!
//! Both kinds share one table; company documents simply have no tender.
//! Reads of a tender's document go through the same visibility check as
//! the tender itself.

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use bidtrack_core::activity::{ACTION_DOCUMENT_DELETED, ACTION_DOCUMENT_UPLOADED};
use bidtrack_core::documents::MAX_CATEGORY_LEN;
use bidtrack_core::error::CoreError;
use bidtrack_core::types::DbId;
use bidtrack_db::models::document::{CreateDocument, Document};
use bidtrack_db::repositories::DocumentRepo;
use serde::Deserialize;
use serde_json::json;
use tokio_util::io::ReaderStream;

use super::record_activity;
use super::tenders::load_visible;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireTenderManager};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{receive_document, remove_stored, stored_path, DocumentUpload};

#[derive(Debug, Deserialize)]
pub struct DocumentListParams {
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Company documents
// ---------------------------------------------------------------------------

/// GET /api/company-documents
pub async fn list_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DocumentListParams>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let documents = DocumentRepo::list_company(&state.pool, category).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/company-documents
///
/// Multipart form: `file` (required), `name` and `category` (optional).
pub async fn upload_company(
    State(state): State<AppState>,
    RequireTenderManager(user): RequireTenderManager,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    let upload = receive_document(&state.config, &mut multipart).await?;
    let document = save_upload(&state, &user, None, upload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/company-documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Document>>> {
    let document = load_document(&state, &user, id).await?;
    Ok(Json(DataResponse { data: document }))
}

/// GET /api/company-documents/{id}/download
///
/// Streams the stored file with its original name as the attachment name.
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let document = load_document(&state, &user, id).await?;
    let path = stored_path(&state.config, &document.stored_name);

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(document_id = id, path = %path.display(), "Stored file is missing");
            return Err(not_found(id));
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };
    let size = file
        .metadata()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &document.mime_type)
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                attachment_name(&document.original_filename)
            ),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// DELETE /api/company-documents/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = DocumentRepo::delete(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    remove_stored(&state.config, &document.stored_name).await;

    tracing::info!(document_id = id, user_id = admin.user_id, "Document deleted");
    record_activity(
        &state,
        document.tender_id,
        admin.user_id,
        ACTION_DOCUMENT_DELETED,
        json!({ "documentId": id, "name": document.name }),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tender documents
// ---------------------------------------------------------------------------

/// GET /api/tenders/{id}/documents
pub async fn list_for_tender(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tender_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    load_visible(&state, &user, tender_id).await?;
    let documents = DocumentRepo::list_for_tender(&state.pool, tender_id).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/tenders/{id}/documents
pub async fn upload_for_tender(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tender_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    load_visible(&state, &user, tender_id).await?;
    let upload = receive_document(&state.config, &mut multipart).await?;
    let document = save_upload(&state, &user, Some(tender_id), upload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Document",
        id,
    })
}

/// Load a document, applying tender visibility when it belongs to one.
async fn load_document(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Document> {
    let document = DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if let Some(tender_id) = document.tender_id {
        load_visible(state, user, tender_id)
            .await
            .map_err(|_| not_found(id))?;
    }
    Ok(document)
}

/// Record a stored upload. The file is removed again if the row cannot be
/// written.
async fn save_upload(
    state: &AppState,
    user: &AuthUser,
    tender_id: Option<DbId>,
    upload: DocumentUpload,
) -> AppResult<Document> {
    let DocumentUpload {
        file,
        name,
        category,
    } = upload;

    if let Some(ref c) = category {
        if c.chars().count() > MAX_CATEGORY_LEN {
            remove_stored(&state.config, &file.stored_name).await;
            return Err(AppError::Core(CoreError::Validation(format!(
                "category must be at most {MAX_CATEGORY_LEN} characters"
            ))));
        }
    }

    let input = CreateDocument {
        tender_id,
        name: name.unwrap_or_else(|| file.original_filename.clone()),
        category,
        original_filename: file.original_filename.clone(),
        stored_name: file.stored_name.clone(),
        mime_type: file.mime_type.to_string(),
        size_bytes: file.size_bytes,
        uploaded_by: user.user_id,
    };

    let document = match DocumentRepo::create(&state.pool, &input).await {
        Ok(document) => document,
        Err(e) => {
            remove_stored(&state.config, &file.stored_name).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        document_id = document.id,
        tender_id = ?tender_id,
        user_id = user.user_id,
        size_bytes = document.size_bytes,
        "Document uploaded",
    );
    record_activity(
        state,
        tender_id,
        user.user_id,
        ACTION_DOCUMENT_UPLOADED,
        json!({ "documentId": document.id, "name": document.name }),
    )
    .await;

    Ok(document)
}

/// Make a stored original name safe for a quoted `Content-Disposition`.
fn attachment_name(original: &str) -> String {
    original
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() || !c.is_ascii() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_name_strips_quotes_and_non_ascii() {
        assert_eq!(attachment_name("bid \"final\".pdf"), "bid _final_.pdf");
        assert_eq!(attachment_name("शुल्क.pdf"), "_____.pdf");
        assert_eq!(attachment_name("line\nbreak.docx"), "line_break.docx");
    }
}
