//! Employment-record validation.
//!
//! Dates travel as `YYYY-MM-DD` strings on the wire and are parsed here so
//! that both backends reject exactly the same inputs. An end date earlier
//! than the start date is accepted.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Wire format for employment dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Salary-range floor used by the graduates-by-year report.
pub const REPORT_MIN_SALARY: i64 = 4_000_000;

/// Validated employment dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmploymentDates {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Check the required text fields and parse both dates.
///
/// A blank `end_date` is treated as absent.
pub fn validate(
    company_name: &str,
    job_title: &str,
    start_date: &str,
    end_date: Option<&str>,
) -> Result<EmploymentDates, CoreError> {
    if company_name.trim().is_empty() || job_title.trim().is_empty() {
        return Err(CoreError::Validation(
            "company_name and job_title are required".into(),
        ));
    }

    let start_date = parse_date(start_date).ok_or_else(|| {
        CoreError::Validation("start_date is required in YYYY-MM-DD format".into())
    })?;

    let end_date = match end_date.map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => Some(parse_date(raw).ok_or_else(|| {
            CoreError::Validation("end_date must use YYYY-MM-DD format".into())
        })?),
    };

    Ok(EmploymentDates {
        start_date,
        end_date,
    })
}
