//! Shared query parameter types for API handlers.

use alumni_core::listing::{
    AlumniQuery, AlumniSort, EmploymentQuery, EmploymentSort, ListQuery, SortOrder,
};
use serde::Deserialize;

/// Listing parameters (`?page=&limit=&search=&sortBy=&order=`).
///
/// Numbers are taken as raw strings so that garbage falls back to the
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    fn into_query<S>(self, sort: S) -> ListQuery<S> {
        let page = self.page.and_then(|p| p.trim().parse().ok());
        let limit = self.limit.and_then(|l| l.trim().parse().ok());
        let order = SortOrder::from_param(self.order.as_deref());
        ListQuery::new(page, limit, self.search, sort, order)
    }

    pub fn alumni_query(self) -> AlumniQuery {
        let sort = AlumniSort::from_param(self.sort_by.as_deref());
        self.into_query(sort)
    }

    pub fn employment_query(self) -> EmploymentQuery {
        let sort = EmploymentSort::from_param(self.sort_by.as_deref());
        self.into_query(sort)
    }
}
