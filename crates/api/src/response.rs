//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Listings add a
//! `meta` block and trash listings a `count`.

use alumni_core::listing::{total_pages, ListQuery, SortOrder};
use alumni_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Pagination metadata echoed back with every paged listing.
#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    /// Effective sort field after the allow-list was applied.
    #[serde(rename = "sortBy")]
    pub sort_by: &'static str,
    pub order: SortOrder,
    pub search: String,
}

impl ListMeta {
    pub fn new<S>(query: &ListQuery<S>, sort_by: &'static str, total: i64) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            total,
            pages: total_pages(total, query.limit),
            sort_by,
            order: query.order,
            search: query.search().unwrap_or_default().to_string(),
        }
    }
}

/// `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

/// `{ "data": [...], "count": n }`.
#[derive(Debug, Serialize)]
pub struct CountedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> CountedResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Outcome of a state-changing action that has no entity body to return.
#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub id: DbId,
    pub message: &'static str,
}
