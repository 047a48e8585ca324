//! Stored document (company or tender) model and DTOs.

use bidtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DbId,
    pub tender_id: Option<DbId>,
    pub name: String,
    pub category: Option<String>,
    pub original_filename: String,
    /// File name inside the upload directory. Never exposed.
    #[serde(skip_serializing)]
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub tender_id: Option<DbId>,
    pub name: String,
    pub category: Option<String>,
    pub original_filename: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_by: DbId,
}
