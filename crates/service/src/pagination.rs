//! Pagination utilities for service layer
//!
//! Turns the raw `page` / `limit` query values of list endpoints and a total
//! row count into an offset/limit window plus the `meta` block returned to
//! clients.

use serde::Serialize;

use crate::errors::ServiceError;

/// Page size used when neither the request nor the configuration provide one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw pagination input. Values `<= 0` (or absent) fall back to defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: Option<i64>,
    /// items per page
    pub limit: Option<i64>,
}

impl Pagination {
    /// Parse query-string values leniently: anything that is not an integer counts as absent.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self { page: parse(page), limit: parse(limit) }
    }

    pub fn meta(self, total: u64, default_limit: i64) -> Result<Meta, ServiceError> {
        Meta::new(self.page.unwrap_or(0), self.limit.unwrap_or(0), total, default_limit)
    }
}

/// Serializable page descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub total_count: u64,
    pub page: i64,
    pub per_page: i64,
    pub page_count: u64,
    #[serde(skip)]
    offset: u64,
}

impl Meta {
    /// Normalize `page` and `limit` against `total`.
    ///
    /// The page is not clamped to `page_count`; asking past the end yields an
    /// empty window. Fails when the effective limit is not positive or the
    /// offset does not fit.
    pub fn new(page: i64, limit: i64, total: u64, default_limit: i64) -> Result<Self, ServiceError> {
        let per_page = if limit <= 0 { default_limit } else { limit };
        if per_page <= 0 {
            return Err(ServiceError::InvalidPagination(format!("limit must be positive, got {per_page}")));
        }
        let page = if page <= 0 { 1 } else { page };
        let offset = (page - 1)
            .checked_mul(per_page)
            .and_then(|o| u64::try_from(o).ok())
            .ok_or_else(|| ServiceError::InvalidPagination(format!("page {page} with limit {per_page} is out of range")))?;
        let page_count = total.div_ceil(per_page as u64);
        Ok(Self { total_count: total, page, per_page, page_count, offset })
    }

    pub fn offset(&self) -> u64 { self.offset }

    pub fn limit(&self) -> u64 { self.per_page as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_page_of_twenty_five() {
        let m = Meta::new(3, 10, 25, DEFAULT_LIMIT).unwrap();
        assert_eq!(m.offset(), 20);
        assert_eq!(m.limit(), 10);
        assert_eq!(m.page_count, 3);
        assert_eq!(m.total_count, 25);
    }

    #[test]
    fn zero_or_absent_page_starts_at_offset_zero() {
        assert_eq!(Meta::new(0, 10, 25, DEFAULT_LIMIT).unwrap().offset(), 0);
        let m = Pagination::default().meta(25, DEFAULT_LIMIT).unwrap();
        assert_eq!(m.page, 1);
        assert_eq!(m.offset(), 0);
        assert_eq!(m.limit(), 10);
    }

    #[test]
    fn negative_limit_uses_default() {
        let m = Meta::new(2, -5, 100, 20).unwrap();
        assert_eq!(m.per_page, 20);
        assert_eq!(m.offset(), 20);
        assert_eq!(m.page_count, 5);
    }

    #[test]
    fn page_past_the_end_is_not_clamped() {
        let m = Meta::new(9, 10, 25, DEFAULT_LIMIT).unwrap();
        assert_eq!(m.page, 9);
        assert_eq!(m.offset(), 80);
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let m = Meta::new(1, 10, 0, DEFAULT_LIMIT).unwrap();
        assert_eq!(m.page_count, 0);
        assert_eq!(m.offset(), 0);
    }

    #[test]
    fn non_positive_default_is_rejected() {
        let err = Meta::new(1, 0, 5, 0).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidPagination(_)));
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        let err = Meta::new(i64::MAX, i64::MAX, 5, DEFAULT_LIMIT).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidPagination(_)));
    }

    #[test]
    fn query_values_parse_leniently() {
        let p = Pagination::from_query(Some("2"), Some("abc"));
        assert_eq!(p, Pagination { page: Some(2), limit: None });
        let m = p.meta(30, DEFAULT_LIMIT).unwrap();
        assert_eq!(m.offset(), 10);
    }

    #[test]
    fn offset_is_not_serialized() {
        let m = Meta::new(2, 5, 12, DEFAULT_LIMIT).unwrap();
        let v = serde_json::to_value(m).unwrap();
        assert_eq!(v, serde_json::json!({"total_count": 12, "page": 2, "per_page": 5, "page_count": 3}));
    }
}
