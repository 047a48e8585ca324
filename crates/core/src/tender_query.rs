//! Tender listing query builder.
//!
//! Turns free-form query-string parameters into a typed [`TenderQuery`] and
//! from there into a parameterized WHERE clause plus an ORDER BY clause. User
//! input only ever reaches SQL as a bind value; the clause text is assembled
//! from fixed fragments and `$n` placeholders.
//!
//! Parsing never fails. Unparseable filters are dropped, and unparseable
//! sort or pagination values fall back to their defaults.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::not_relevant::{NR_APPROVED, NR_PENDING};
use crate::pagination::{offset_for, parse_limit, parse_page};
use crate::tender::{is_valid_source, is_valid_status};
use crate::types::{DbId, Timestamp};

/// Raw query-string parameters accepted by `GET /api/tenders`.
///
/// Every field is a string so that malformed values reach the parser instead
/// of failing deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderQueryParams {
    pub status: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
    pub assigned_to: Option<String>,
    pub category: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub deadline_from: Option<String>,
    pub deadline_to: Option<String>,
    pub not_relevant: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Whitelisted sort columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Deadline,
    Value,
    CreatedAt,
    Title,
    Organization,
}

impl SortColumn {
    /// Parse a `sortBy` value. Unknown keys yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "deadline" => Some(Self::Deadline),
            "value" => Some(Self::Value),
            "created_at" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "organization" => Some(Self::Organization),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Value => "value",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
            Self::Organization => "organization",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `assignedTo` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeFilter {
    User(DbId),
    Unassigned,
}

/// Visibility of tenders touched by the not-relevant workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotRelevantVisibility {
    /// Hide tenders whose not-relevant request was approved.
    #[default]
    Hide,
    /// Show everything.
    Include,
    /// Only tenders approved as not relevant.
    Only,
    /// Only tenders with a pending request.
    Pending,
}

impl NotRelevantVisibility {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hide" => Some(Self::Hide),
            "include" | "all" => Some(Self::Include),
            "only" | "approved" => Some(Self::Only),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// A typed bind value for the dynamically built tender query.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    TextArray(Vec<String>),
    Timestamp(Timestamp),
}

/// WHERE clause and its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct TenderFilter {
    /// Empty when no predicate applies, otherwise starts with `WHERE `.
    pub where_clause: String,
    pub binds: Vec<BindValue>,
    /// The next free placeholder index (for LIMIT/OFFSET).
    pub next_bind_idx: u32,
}

/// Fully parsed tender listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct TenderQuery {
    pub statuses: Vec<String>,
    pub sources: Vec<String>,
    pub search: Option<String>,
    pub assigned_to: Option<AssigneeFilter>,
    pub category: Option<String>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub deadline_from: Option<Timestamp>,
    pub deadline_to: Option<Timestamp>,
    pub not_relevant: NotRelevantVisibility,
    pub sort: SortColumn,
    pub direction: SortDirection,
    pub page: i64,
    pub limit: i64,
}

impl Default for TenderQuery {
    fn default() -> Self {
        Self::from_params(&TenderQueryParams::default())
    }
}

impl TenderQuery {
    /// Parse raw parameters. Never fails.
    pub fn from_params(params: &TenderQueryParams) -> Self {
        Self {
            statuses: parse_list(params.status.as_deref(), is_valid_status),
            sources: parse_list(params.source.as_deref(), is_valid_source),
            search: non_empty(params.search.as_deref()),
            assigned_to: params.assigned_to.as_deref().and_then(parse_assignee),
            category: non_empty(params.category.as_deref()),
            min_value: params.min_value.as_deref().and_then(parse_amount),
            max_value: params.max_value.as_deref().and_then(parse_amount),
            deadline_from: params
                .deadline_from
                .as_deref()
                .and_then(|s| parse_bound(s, NaiveTime::MIN)),
            deadline_to: params
                .deadline_to
                .as_deref()
                .and_then(|s| parse_bound(s, end_of_day())),
            not_relevant: params
                .not_relevant
                .as_deref()
                .and_then(NotRelevantVisibility::parse)
                .unwrap_or_default(),
            sort: params
                .sort_by
                .as_deref()
                .and_then(SortColumn::parse)
                .unwrap_or_default(),
            direction: params
                .sort_order
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
            page: parse_page(params.page.as_deref()),
            limit: parse_limit(params.limit.as_deref()),
        }
    }

    /// Force the listing to a single assignee, overriding any client filter.
    pub fn restrict_to_assignee(&mut self, user_id: DbId) {
        self.assigned_to = Some(AssigneeFilter::User(user_id));
    }

    pub fn offset(&self) -> i64 {
        offset_for(self.page, self.limit)
    }

    /// ORDER BY clause with `id` as a tie-breaker so paging is stable.
    pub fn order_by_clause(&self) -> String {
        let dir = self.direction.keyword();
        format!(
            "ORDER BY {} {dir} NULLS LAST, id {dir}",
            self.sort.column()
        )
    }

    /// Build the WHERE clause shared by the page query and the count query.
    pub fn build_filter(&self) -> TenderFilter {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<BindValue> = Vec::new();
        let mut bind_idx = 1u32;

        if !self.statuses.is_empty() {
            conditions.push(format!("status = ANY(${bind_idx})"));
            bind_idx += 1;
            binds.push(BindValue::TextArray(self.statuses.clone()));
        }

        if !self.sources.is_empty() {
            conditions.push(format!("source = ANY(${bind_idx})"));
            bind_idx += 1;
            binds.push(BindValue::TextArray(self.sources.clone()));
        }

        if let Some(ref search) = self.search {
            conditions.push(format!(
                "(title ILIKE ${bind_idx} ESCAPE '\\' \
                 OR organization ILIKE ${bind_idx} ESCAPE '\\' \
                 OR description ILIKE ${bind_idx} ESCAPE '\\')"
            ));
            bind_idx += 1;
            binds.push(BindValue::Text(format!("%{}%", escape_like(search))));
        }

        match self.assigned_to {
            Some(AssigneeFilter::User(id)) => {
                conditions.push(format!("assigned_to = ${bind_idx}"));
                bind_idx += 1;
                binds.push(BindValue::BigInt(id));
            }
            Some(AssigneeFilter::Unassigned) => conditions.push("assigned_to IS NULL".into()),
            None => {}
        }

        if let Some(ref category) = self.category {
            conditions.push(format!("LOWER(category) = LOWER(${bind_idx})"));
            bind_idx += 1;
            binds.push(BindValue::Text(category.clone()));
        }

        if let Some(min) = self.min_value {
            conditions.push(format!("value >= ${bind_idx}"));
            bind_idx += 1;
            binds.push(BindValue::BigInt(min));
        }

        if let Some(max) = self.max_value {
            conditions.push(format!("value <= ${bind_idx}"));
            bind_idx += 1;
            binds.push(BindValue::BigInt(max));
        }

        if let Some(from) = self.deadline_from {
            conditions.push(format!("deadline >= ${bind_idx}"));
            bind_idx += 1;
            binds.push(BindValue::Timestamp(from));
        }

        if let Some(to) = self.deadline_to {
            conditions.push(format!("deadline <= ${bind_idx}"));
            bind_idx += 1;
            binds.push(BindValue::Timestamp(to));
        }

        match self.not_relevant {
            NotRelevantVisibility::Hide => conditions.push(format!(
                "(not_relevant_status IS NULL OR not_relevant_status <> '{NR_APPROVED}')"
            )),
            NotRelevantVisibility::Only => {
                conditions.push(format!("not_relevant_status = '{NR_APPROVED}'"))
            }
            NotRelevantVisibility::Pending => {
                conditions.push(format!("not_relevant_status = '{NR_PENDING}'"))
            }
            NotRelevantVisibility::Include => {}
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        TenderFilter {
            where_clause,
            binds,
            next_bind_idx: bind_idx,
        }
    }
}

/// Escape `LIKE` metacharacters so user text matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_list(raw: Option<&str>, is_valid: fn(&str) -> bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.unwrap_or_default().split(',') {
        let item = item.trim();
        if is_valid(item) && !out.iter().any(|s| s == item) {
            out.push(item.to_string());
        }
    }
    out
}

fn parse_assignee(raw: &str) -> Option<AssigneeFilter> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("unassigned") || raw.eq_ignore_ascii_case("none") {
        return Some(AssigneeFilter::Unassigned);
    }
    raw.parse::<DbId>().ok().map(AssigneeFilter::User)
}

fn parse_amount(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN)
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date, the latter
/// pinned to `time_of_day` in UTC.
fn parse_bound(raw: &str, time_of_day: NaiveTime) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(time_of_day).and_utc())
}
