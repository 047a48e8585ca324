//! Repository for the `documents` table.

use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{CreateDocument, Document};

const COLUMNS: &str = "\
    id, tender_id, name, category, original_filename, stored_name, mime_type, size_bytes, \
    uploaded_by, created_at, updated_at";

/// Metadata for uploaded company and tender documents.
pub struct DocumentRepo;

impl DocumentRepo {
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (tender_id, name, category, original_filename, stored_name, \
                mime_type, size_bytes, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.tender_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.original_filename)
            .bind(&input.stored_name)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Company documents (no tender), optionally filtered by category
    /// (case-insensitive), newest first.
    pub async fn list_company(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE tender_id IS NULL
               AND ($1::TEXT IS NULL OR LOWER(category) = LOWER($1))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Documents attached to a tender, newest first.
    pub async fn list_for_tender(
        pool: &PgPool,
        tender_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE tender_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(tender_id)
            .fetch_all(pool)
            .await
    }

    /// Delete the row, returning it so the caller can remove the file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("DELETE FROM documents WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
