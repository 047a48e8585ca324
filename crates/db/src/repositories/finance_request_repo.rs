//! Repository for the `finance_requests` table.

use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::finance_request::{CreateFinanceRequest, FinanceRequest, FinanceRequestFilter};

const COLUMNS: &str = "\
    id, tender_id, request_type, amount, status, requested_by, decided_by, decided_at, \
    remarks, due_date, created_at, updated_at";

/// Provides create, list and status transitions for finance requests.
pub struct FinanceRequestRepo;

impl FinanceRequestRepo {
    /// Insert a new request in `pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFinanceRequest,
        requested_by: DbId,
    ) -> Result<FinanceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO finance_requests (tender_id, request_type, amount, requested_by, remarks, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FinanceRequest>(&query)
            .bind(input.tender_id)
            .bind(&input.request_type)
            .bind(input.amount)
            .bind(requested_by)
            .bind(&input.remarks)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FinanceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM finance_requests WHERE id = $1");
        sqlx::query_as::<_, FinanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of requests matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &FinanceRequestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FinanceRequest>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_finance_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM finance_requests {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, FinanceRequest>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count requests matching `filter`.
    pub async fn count(pool: &PgPool, filter: &FinanceRequestFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_finance_filter(filter);
        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM finance_requests {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.fetch_one(pool).await
    }

    /// Move a request from `from` to `to`.
    ///
    /// The first decision stamps `decided_by` / `decided_at`; later
    /// transitions keep them. Returns `None` if the request does not exist
    /// or is no longer in `from`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
        actor: DbId,
        remarks: Option<&str>,
    ) -> Result<Option<FinanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE finance_requests SET
                status = $3,
                decided_by = COALESCE(decided_by, $4),
                decided_at = COALESCE(decided_at, NOW()),
                remarks = COALESCE($5, remarks)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FinanceRequest>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .bind(actor)
            .bind(remarks)
            .fetch_optional(pool)
            .await
    }
}

enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_finance_filter(filter: &FinanceRequestFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(tender_id) = filter.tender_id {
        conditions.push(format!("tender_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(tender_id));
    }

    if let Some(ref request_type) = filter.request_type {
        conditions.push(format!("request_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(request_type.clone()));
    }

    if let Some(requested_by) = filter.requested_by {
        conditions.push(format!("requested_by = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(requested_by));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
