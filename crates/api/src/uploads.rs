//! Multipart upload handling shared by the document and import handlers.
//!
//! Document files are streamed chunk by chunk into `UPLOAD_DIR` under a
//! generated name, so the client-supplied file name never reaches the
//! filesystem. The configured size limit is enforced while streaming.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use bidtrack_core::documents::{validate_document, validate_spreadsheet};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// A document written to the upload directory.
#[derive(Debug)]
pub struct StoredFile {
    pub original_filename: String,
    pub stored_name: String,
    pub mime_type: &'static str,
    pub size_bytes: i64,
}

/// A parsed document upload: the stored file plus its form fields.
#[derive(Debug)]
pub struct DocumentUpload {
    pub file: StoredFile,
    pub name: Option<String>,
    pub category: Option<String>,
}

/// An in-memory spreadsheet for the tender import.
#[derive(Debug)]
pub struct SpreadsheetUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Absolute location of a stored document.
pub fn stored_path(config: &ServerConfig, stored_name: &str) -> PathBuf {
    config.upload_dir.join(stored_name)
}

/// Best-effort removal of a stored file. Missing files are not an error.
pub async fn remove_stored(config: &ServerConfig, stored_name: &str) {
    let path = stored_path(config, stored_name);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove stored file");
        }
    }
}

/// Read a document upload: one `file` field plus optional `name` and
/// `category` text fields, in any order.
pub async fn receive_document(
    config: &ServerConfig,
    multipart: &mut Multipart,
) -> AppResult<DocumentUpload> {
    let mut file: Option<StoredFile> = None;
    let mut name: Option<String> = None;
    let mut category: Option<String> = None;

    let result = async {
        while let Some(mut field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                FILE_FIELD => {
                    if file.is_some() {
                        return Err(AppError::BadRequest(
                            "Only one file may be uploaded per request".into(),
                        ));
                    }
                    file = Some(store_field(config, &mut field).await?);
                }
                "name" => name = non_blank(field.text().await?),
                "category" => category = non_blank(field.text().await?),
                _ => {}
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    if let Err(e) = result {
        if let Some(ref stored) = file {
            remove_stored(config, &stored.stored_name).await;
        }
        return Err(e);
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    Ok(DocumentUpload {
        file,
        name,
        category,
    })
}

/// Read a spreadsheet upload fully into memory, enforcing the size limit.
pub async fn receive_spreadsheet(
    config: &ServerConfig,
    multipart: &mut Multipart,
) -> AppResult<SpreadsheetUpload> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        validate_spreadsheet(&filename, field.content_type())?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if bytes.len() + chunk.len() > config.max_upload_bytes {
                return Err(too_large(config.max_upload_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(SpreadsheetUpload { filename, bytes });
    }
    Err(AppError::BadRequest("Missing required 'file' field".into()))
}

/// Validate the field's file type, then stream it to a fresh file.
async fn store_field(config: &ServerConfig, field: &mut Field<'_>) -> AppResult<StoredFile> {
    let original_filename = field
        .file_name()
        .map(str::to_string)
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("The 'file' field has no file name".into()))?;
    let (ext, mime_type) = validate_document(&original_filename, field.content_type())?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot create upload dir: {e}")))?;

    let stored_name = format!("{}.{ext}", Uuid::new_v4());
    let path = stored_path(config, &stored_name);

    match write_stream(field, &path, config.max_upload_bytes).await {
        Ok(size) => Ok(StoredFile {
            original_filename,
            stored_name,
            mime_type,
            size_bytes: size as i64,
        }),
        Err(e) => {
            let _ = tokio::fs::remove_file(&path).await;
            Err(e)
        }
    }
}

async fn write_stream(field: &mut Field<'_>, path: &Path, max_bytes: usize) -> AppResult<usize> {
    let mut out = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot create file: {e}")))?;
    let mut written = 0usize;

    while let Some(chunk) = field.chunk().await? {
        written += chunk.len();
        if written > max_bytes {
            return Err(too_large(max_bytes));
        }
        out.write_all(&chunk)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot write file: {e}")))?;
    }
    out.flush()
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot write file: {e}")))?;

    if written == 0 {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    Ok(written)
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!("File exceeds the {max_bytes} byte upload limit"))
}

fn non_blank(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}
