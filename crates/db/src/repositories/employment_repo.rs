//! Repository for the `employment_records` table.

use alumni_core::listing::{like_pattern, EmploymentQuery};
use alumni_core::types::DbId;
use sqlx::PgPool;

use crate::models::employment::{EmploymentData, EmploymentRecord, GraduateEmployment};
use crate::stores::RecordState;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, alumni_id, company_name, job_title, industry, location, salary_range, \
                       start_date, end_date, status, description, \
                       created_at, updated_at, deleted_at";

/// Search predicate over company, job title and industry. `$1` is NULL for
/// no filter.
const SEARCH_FILTER: &str = "deleted_at IS NULL
     AND ($1::text IS NULL OR company_name ILIKE $1 OR job_title ILIKE $1 OR industry ILIKE $1)";

/// Provides CRUD, soft-delete, restore and trash operations for
/// employment records.
pub struct EmploymentRepo;

impl EmploymentRepo {
    /// One page of live records.
    pub async fn list(
        pool: &PgPool,
        params: &EmploymentQuery,
    ) -> Result<Vec<EmploymentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employment_records
             WHERE {SEARCH_FILTER}
             ORDER BY {} {}, id ASC
             LIMIT $2 OFFSET $3",
            params.sort.column(),
            params.order.sql(),
        );
        sqlx::query_as::<_, EmploymentRecord>(&query)
            .bind(params.search().map(like_pattern))
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live records matching `search`.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM employment_records WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(search.map(like_pattern))
            .fetch_one(pool)
            .await
    }

    /// Find a record by ID in the requested lifecycle state.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        state: RecordState,
    ) -> Result<Option<EmploymentRecord>, sqlx::Error> {
        let deleted = match state {
            RecordState::Live => "deleted_at IS NULL",
            RecordState::Trashed => "deleted_at IS NOT NULL",
        };
        let query = format!("SELECT {COLUMNS} FROM employment_records WHERE id = $1 AND {deleted}");
        sqlx::query_as::<_, EmploymentRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Live records for one alumni, most recent start date first.
    pub async fn list_by_alumni(
        pool: &PgPool,
        alumni_id: DbId,
    ) -> Result<Vec<EmploymentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employment_records
             WHERE alumni_id = $1 AND deleted_at IS NULL
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, EmploymentRecord>(&query)
            .bind(alumni_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        alumni_id: DbId,
        input: &EmploymentData,
    ) -> Result<EmploymentRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO employment_records
                (alumni_id, company_name, job_title, industry, location, salary_range,
                 start_date, end_date, status, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmploymentRecord>(&query)
            .bind(alumni_id)
            .bind(&input.company_name)
            .bind(&input.job_title)
            .bind(&input.industry)
            .bind(&input.location)
            .bind(input.salary_range)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Replace the fields of a live record.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EmploymentData,
    ) -> Result<Option<EmploymentRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE employment_records SET
                company_name = $2,
                job_title = $3,
                industry = $4,
                location = $5,
                salary_range = $6,
                start_date = $7,
                end_date = $8,
                status = $9,
                description = $10,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmploymentRecord>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.job_title)
            .bind(&input.industry)
            .bind(&input.location)
            .bind(input.salary_range)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a record by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employment_records SET deleted_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted record. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employment_records SET deleted_at = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a soft-deleted record. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM employment_records WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deleted records, most recently deleted first. `None` lists the
    /// whole trash; otherwise only records of the given alumni.
    pub async fn list_trashed(
        pool: &PgPool,
        alumni_ids: Option<&[DbId]>,
    ) -> Result<Vec<EmploymentRecord>, sqlx::Error> {
        match alumni_ids {
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM employment_records
                     WHERE deleted_at IS NOT NULL
                     ORDER BY deleted_at DESC, id DESC"
                );
                sqlx::query_as::<_, EmploymentRecord>(&query)
                    .fetch_all(pool)
                    .await
            }
            Some(ids) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM employment_records
                     WHERE deleted_at IS NOT NULL AND alumni_id = ANY($1)
                     ORDER BY deleted_at DESC, id DESC"
                );
                sqlx::query_as::<_, EmploymentRecord>(&query)
                    .bind(ids)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Live graduates of `year` with live records paying at least `min_salary`.
    pub async fn graduates_with_salary(
        pool: &PgPool,
        year: i32,
        min_salary: i64,
    ) -> Result<Vec<GraduateEmployment>, sqlx::Error> {
        sqlx::query_as::<_, GraduateEmployment>(
            "SELECT a.id AS alumni_id, a.name, a.major, a.graduation_year,
                    e.industry, e.company_name, e.job_title, e.salary_range
             FROM alumni a
             JOIN employment_records e ON e.alumni_id = a.id
             WHERE a.graduation_year = $1
               AND e.salary_range >= $2
               AND a.deleted_at IS NULL
               AND e.deleted_at IS NULL
             ORDER BY a.id ASC, e.id ASC",
        )
        .bind(year)
        .bind(min_salary)
        .fetch_all(pool)
        .await
    }
}
