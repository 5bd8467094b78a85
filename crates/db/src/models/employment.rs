//! Employment-record model and DTOs.

use alumni_core::employment::EmploymentDates;
use alumni_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `employment_records` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct EmploymentRecord {
    pub id: DbId,
    pub alumni_id: DbId,
    pub company_name: String,
    pub job_title: String,
    pub industry: String,
    pub location: String,
    pub salary_range: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// Fields shared by the create and update request bodies. Dates are raw
/// `YYYY-MM-DD` strings until validated.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentFields {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: i64,
    #[serde(default)]
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for creating an employment record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployment {
    pub alumni_id: DbId,
    #[serde(flatten)]
    pub fields: EmploymentFields,
}

/// Validated employment data as written to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct EmploymentData {
    pub company_name: String,
    pub job_title: String,
    pub industry: String,
    pub location: String,
    pub salary_range: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub description: String,
}

impl EmploymentData {
    pub fn from_fields(fields: EmploymentFields, dates: EmploymentDates) -> Self {
        Self {
            company_name: fields.company_name,
            job_title: fields.job_title,
            industry: fields.industry,
            location: fields.location,
            salary_range: fields.salary_range,
            start_date: dates.start_date,
            end_date: dates.end_date,
            status: fields.status,
            description: fields.description,
        }
    }
}

/// Row of the graduates-by-year salary report.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct GraduateEmployment {
    pub alumni_id: DbId,
    pub name: String,
    pub major: String,
    pub graduation_year: i32,
    pub industry: String,
    pub company_name: String,
    pub job_title: String,
    pub salary_range: i64,
}
