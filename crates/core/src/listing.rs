//! Pagination, sorting and search helpers shared by every listing endpoint.
//!
//! Lives in `core` so both storage backends and the HTTP layer agree on the
//! exact same defaults, clamps and sort allow-lists.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of records per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of records per page.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a requested page number: missing or `< 1` becomes [`DEFAULT_PAGE`].
pub fn clamp_page(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p >= 1 => p,
        _ => DEFAULT_PAGE,
    }
}

/// Clamp a requested page size: missing or `< 1` becomes [`DEFAULT_LIMIT`],
/// anything above [`MAX_LIMIT`] is capped.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l >= 1 => l.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// `ceil(total / limit)`; zero when there are no records.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) sorts descending; everything else ascending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Direction value for a document-store sort specification.
    pub fn direction(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Sortable alumni fields. Unrecognised input falls back to `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlumniSort {
    #[default]
    Id,
    Name,
    Major,
    CohortYear,
    GraduationYear,
    CreatedAt,
}

impl AlumniSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.unwrap_or_default() {
            "name" => Self::Name,
            "major" => Self::Major,
            "cohort_year" => Self::CohortYear,
            "graduation_year" => Self::GraduationYear,
            "created_at" => Self::CreatedAt,
            _ => Self::Id,
        }
    }

    /// Column / field name; also echoed back as `meta.sortBy`.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Major => "major",
            Self::CohortYear => "cohort_year",
            Self::GraduationYear => "graduation_year",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sortable employment-record fields. Unrecognised input falls back to
/// `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmploymentSort {
    Id,
    CompanyName,
    JobTitle,
    Industry,
    SalaryRange,
    StartDate,
    #[default]
    CreatedAt,
}

impl EmploymentSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.unwrap_or_default() {
            "id" => Self::Id,
            "company_name" => Self::CompanyName,
            "job_title" => Self::JobTitle,
            "industry" => Self::Industry,
            "salary_range" => Self::SalaryRange,
            "start_date" => Self::StartDate,
            _ => Self::CreatedAt,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CompanyName => "company_name",
            Self::JobTitle => "job_title",
            Self::Industry => "industry",
            Self::SalaryRange => "salary_range",
            Self::StartDate => "start_date",
            Self::CreatedAt => "created_at",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved listing request
// ---------------------------------------------------------------------------

/// A listing request after defaults, clamps and allow-lists were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S> {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub sort: S,
    pub order: SortOrder,
}

impl<S> ListQuery<S> {
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
        search: Option<String>,
        sort: S,
        order: SortOrder,
    ) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit),
            search: normalize_search(search),
            sort,
            order,
        }
    }

    /// `(page - 1) * limit`, saturating so absurd page numbers read past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

pub type AlumniQuery = ListQuery<AlumniSort>;
pub type EmploymentQuery = ListQuery<EmploymentSort>;

// ---------------------------------------------------------------------------
// Search helpers
// ---------------------------------------------------------------------------

/// Trim a search term; blank terms mean "no filter".
pub fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Build a case-insensitive `ILIKE` pattern matching `term` literally.
///
/// `%`, `_` and the escape character itself are escaped with `\`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match used by non-SQL backends.
pub fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamps --

    #[test]
    fn page_defaults_and_floor() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn limit_defaults_and_cap() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(1000)), MAX_LIMIT);
    }

    // -- pages --

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(101, 100), 2);
    }

    #[test]
    fn offset_from_page() {
        let q = AlumniQuery::new(Some(3), Some(20), None, AlumniSort::Id, SortOrder::Asc);
        assert_eq!(q.offset(), 40);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let q = AlumniQuery::new(Some(i64::MAX), Some(10), None, AlumniSort::Id, SortOrder::Asc);
        assert_eq!(q.offset(), i64::MAX);
    }

    // -- sort allow-lists --

    #[test]
    fn alumni_sort_falls_back_to_id() {
        assert_eq!(AlumniSort::from_param(Some("name")), AlumniSort::Name);
        assert_eq!(AlumniSort::from_param(Some("name; DROP TABLE")), AlumniSort::Id);
        assert_eq!(AlumniSort::from_param(None), AlumniSort::Id);
    }

    #[test]
    fn employment_sort_falls_back_to_created_at() {
        assert_eq!(
            EmploymentSort::from_param(Some("salary_range")).column(),
            "salary_range"
        );
        assert_eq!(
            EmploymentSort::from_param(Some("password")),
            EmploymentSort::CreatedAt
        );
    }

    #[test]
    fn order_only_desc_is_descending() {
        assert_eq!(SortOrder::from_param(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(None), SortOrder::Asc);
    }

    // -- search --

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(normalize_search(Some("   ".into())), None);
        assert_eq!(normalize_search(Some(" ann ".into())), Some("ann".into()));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn matches_term_ignores_case() {
        assert!(matches_term("Computer Science", "science"));
        assert!(!matches_term("Biology", "science"));
    }
}
