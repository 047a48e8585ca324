//! Page/limit pagination shared by every list endpoint.

use serde::Serialize;

/// Default page size when `limit` is absent or unparseable.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page size a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Parse a `page` query value. Anything unparseable or below 1 becomes 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Parse a `limit` query value, falling back to [`DEFAULT_LIMIT`] and
/// clamping into `1..=MAX_LIMIT`.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

/// Row offset for a 1-based page.
pub fn offset_for(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}

/// Pagination metadata returned next to every page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// `{ data, pagination }` envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_pages() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn partial_last_page_rounds_up() {
        let meta = PaginationMeta::new(1, 20, 41);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
    }

    #[test]
    fn last_page_has_prev_but_not_next() {
        let meta = PaginationMeta::new(3, 20, 41);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn page_parsing_is_defensive() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some(" 3 ")), 3);
    }

    #[test]
    fn limit_parsing_is_clamped() {
        assert_eq!(parse_limit(None), DEFAULT_LIMIT);
        assert_eq!(parse_limit(Some("x")), DEFAULT_LIMIT);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("5000")), MAX_LIMIT);
        assert_eq!(parse_limit(Some("50")), 50);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset_for(1, 20), 0);
        assert_eq!(offset_for(3, 20), 40);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PaginationMeta::new(2, 10, 25)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrev"], true);
    }
}
