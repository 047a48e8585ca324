//! Repository for the `tenders` table.

use bidtrack_core::not_relevant::{NR_APPROVED, NR_PENDING, NR_REJECTED};
use bidtrack_core::tender_query::{BindValue, TenderQuery};
use bidtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::tender::{CreateTender, Tender, UpdateTender};
use crate::repositories::AssignmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, organization, description, category, location, reference_number, \
    value, currency, estimated_value, emd_amount, win_probability, \
    deadline, publish_date, submission_deadline, status, source, assigned_to, ai_score, \
    not_relevant_status, not_relevant_reason, not_relevant_requested_by, \
    not_relevant_requested_at, not_relevant_decided_by, not_relevant_decided_at, \
    not_relevant_comments, created_by, created_at, updated_at";

/// Provides CRUD, listing and workflow operations for tenders.
pub struct TenderRepo;

impl TenderRepo {
    /// Insert a new tender, returning the created row.
    ///
    /// Omitted `value`, `currency`, `status` and `source` fall back to
    /// `0`, `INR`, `draft` and `portal`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTender,
        created_by: Option<DbId>,
    ) -> Result<Tender, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenders (title, organization, description, category, location, \
                reference_number, value, currency, estimated_value, emd_amount, win_probability, \
                deadline, publish_date, submission_deadline, status, source, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 'INR'), $9, $10, $11, \
                $12, $13, $14, COALESCE($15, 'draft'), COALESCE($16, 'portal'), $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(&input.title)
            .bind(&input.organization)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.reference_number)
            .bind(input.value)
            .bind(&input.currency)
            .bind(input.estimated_value)
            .bind(input.emd_amount)
            .bind(input.win_probability)
            .bind(input.deadline)
            .bind(input.publish_date)
            .bind(input.submission_deadline)
            .bind(&input.status)
            .bind(&input.source)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a tender by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenders WHERE id = $1");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of tenders matching `params`, in the requested order.
    pub async fn list(pool: &PgPool, params: &TenderQuery) -> Result<Vec<Tender>, sqlx::Error> {
        let filter = params.build_filter();
        let bind_idx = filter.next_bind_idx;

        let query = format!(
            "SELECT {COLUMNS} FROM tenders {} {} LIMIT ${bind_idx} OFFSET ${}",
            filter.where_clause,
            params.order_by_clause(),
            bind_idx + 1
        );

        let q = bind_tender_values(sqlx::query_as::<_, Tender>(&query), &filter.binds);
        q.bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Count tenders matching `params` (for pagination metadata).
    ///
    /// Uses the same WHERE clause as [`TenderRepo::list`] without
    /// ORDER BY / LIMIT / OFFSET.
    pub async fn count(pool: &PgPool, params: &TenderQuery) -> Result<i64, sqlx::Error> {
        let filter = params.build_filter();
        let query = format!(
            "SELECT COUNT(*)::BIGINT AS count FROM tenders {}",
            filter.where_clause
        );
        let q = bind_tender_values_scalar(sqlx::query_scalar::<_, i64>(&query), &filter.binds);
        q.fetch_one(pool).await
    }

    /// Update a tender. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTender,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!(
            "UPDATE tenders SET
                title = COALESCE($2, title),
                organization = COALESCE($3, organization),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                location = COALESCE($6, location),
                reference_number = COALESCE($7, reference_number),
                value = COALESCE($8, value),
                currency = COALESCE($9, currency),
                estimated_value = COALESCE($10, estimated_value),
                emd_amount = COALESCE($11, emd_amount),
                win_probability = COALESCE($12, win_probability),
                deadline = COALESCE($13, deadline),
                publish_date = COALESCE($14, publish_date),
                submission_deadline = COALESCE($15, submission_deadline),
                status = COALESCE($16, status),
                source = COALESCE($17, source)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.organization)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.reference_number)
            .bind(input.value)
            .bind(&input.currency)
            .bind(input.estimated_value)
            .bind(input.emd_amount)
            .bind(input.win_probability)
            .bind(input.deadline)
            .bind(input.publish_date)
            .bind(input.submission_deadline)
            .bind(&input.status)
            .bind(&input.source)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a tender by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tenders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set (or clear) the current assignee and record the change in the
    /// assignment history, atomically.
    ///
    /// Returns `None` if the tender does not exist.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        assignee: Option<DbId>,
        assigned_by: DbId,
        note: Option<&str>,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE tenders SET assigned_to = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let Some(tender) = sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(assignee)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        AssignmentRepo::record(&mut *tx, id, assignee, Some(assigned_by), note).await?;

        tx.commit().await?;
        Ok(Some(tender))
    }

    /// Replace the operational status. Returns `None` if the tender does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!("UPDATE tenders SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Persist an AI compatibility score (already clamped to 0..=100).
    pub async fn set_ai_score(
        pool: &PgPool,
        id: DbId,
        score: i32,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!("UPDATE tenders SET ai_score = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(score)
            .fetch_optional(pool)
            .await
    }

    /// File a not-relevant request.
    ///
    /// Only applies when no request is open and the tender was not already
    /// approved as not relevant; returns `None` otherwise (or if the tender
    /// does not exist). Any earlier decision fields are cleared.
    pub async fn request_not_relevant(
        pool: &PgPool,
        id: DbId,
        requested_by: DbId,
        reason: &str,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let query = format!(
            "UPDATE tenders SET
                not_relevant_status = '{NR_PENDING}',
                not_relevant_reason = $3,
                not_relevant_requested_by = $2,
                not_relevant_requested_at = NOW(),
                not_relevant_decided_by = NULL,
                not_relevant_decided_at = NULL,
                not_relevant_comments = NULL
             WHERE id = $1
               AND (not_relevant_status IS NULL OR not_relevant_status = '{NR_REJECTED}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(requested_by)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Record the decision on a pending not-relevant request.
    ///
    /// An approval also releases the current assignment (logged in the
    /// assignment history). A rejection touches only the not-relevant
    /// fields. Returns `None` if the tender has no pending request.
    pub async fn decide_not_relevant(
        pool: &PgPool,
        id: DbId,
        decided_by: DbId,
        decision: &str,
        comments: Option<&str>,
    ) -> Result<Option<Tender>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_assignee: Option<Option<DbId>> = sqlx::query_scalar(&format!(
            "SELECT assigned_to FROM tenders \
             WHERE id = $1 AND not_relevant_status = '{NR_PENDING}' FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(previous_assignee) = previous_assignee else {
            return Ok(None);
        };

        let release = decision == NR_APPROVED;
        let query = format!(
            "UPDATE tenders SET
                not_relevant_status = $3,
                not_relevant_decided_by = $2,
                not_relevant_decided_at = NOW(),
                not_relevant_comments = $4,
                assigned_to = CASE WHEN $5 THEN NULL ELSE assigned_to END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let tender = sqlx::query_as::<_, Tender>(&query)
            .bind(id)
            .bind(decided_by)
            .bind(decision)
            .bind(comments)
            .bind(release)
            .fetch_one(&mut *tx)
            .await?;

        if release && previous_assignee.is_some() {
            AssignmentRepo::record(
                &mut *tx,
                id,
                None,
                Some(decided_by),
                Some("Released: approved as not relevant"),
            )
            .await?;
        }

        tx.commit().await?;
        Ok(Some(tender))
    }

    /// Tenders awaiting a not-relevant decision, oldest request first.
    pub async fn list_pending_not_relevant(pool: &PgPool) -> Result<Vec<Tender>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tenders
             WHERE not_relevant_status = '{NR_PENDING}'
             ORDER BY not_relevant_requested_at ASC, id ASC"
        );
        sqlx::query_as::<_, Tender>(&query).fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query binding
// ---------------------------------------------------------------------------

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_tender_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_tender_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
