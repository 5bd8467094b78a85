//! Repository for the `alumni` table.

use alumni_core::listing::{like_pattern, AlumniQuery};
use alumni_core::types::DbId;
use alumni_core::uploads::UploadKind;
use sqlx::PgPool;

use crate::models::alumni::{Alumni, NewAlumni, UpdateAlumni};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_number, name, major, cohort_year, graduation_year, email, \
                       phone, address, user_id, photo_path, certificate_path, \
                       created_at, updated_at, deleted_at";

/// Search predicate over name, major and email. `$1` is NULL for no filter.
const SEARCH_FILTER: &str = "deleted_at IS NULL
     AND ($1::text IS NULL OR name ILIKE $1 OR major ILIKE $1 OR email ILIKE $1)";

/// Provides CRUD and soft-delete operations for alumni.
pub struct AlumniRepo;

impl AlumniRepo {
    /// One page of live alumni.
    ///
    /// The sort column comes from the [`AlumniSort`](alumni_core::listing::AlumniSort)
    /// allow-list, never from raw input.
    pub async fn list(pool: &PgPool, params: &AlumniQuery) -> Result<Vec<Alumni>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alumni
             WHERE {SEARCH_FILTER}
             ORDER BY {} {}, id ASC
             LIMIT $2 OFFSET $3",
            params.sort.column(),
            params.order.sql(),
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(params.search().map(like_pattern))
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Count live alumni matching `search`.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM alumni WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(search.map(like_pattern))
            .fetch_one(pool)
            .await
    }

    /// Find an alumni record by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alumni>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alumni WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Alumni>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an alumni record by ID, including soft-deleted rows. Used for
    /// owner resolution of trashed children.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Alumni>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alumni WHERE id = $1");
        sqlx::query_as::<_, Alumni>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All alumni owned by a user, soft-deleted rows included.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Alumni>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alumni WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Alumni>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new alumni record, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewAlumni) -> Result<Alumni, sqlx::Error> {
        let query = format!(
            "INSERT INTO alumni
                (student_number, name, major, cohort_year, graduation_year,
                 email, phone, address, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(&input.student_number)
            .bind(&input.name)
            .bind(&input.major)
            .bind(input.cohort_year)
            .bind(input.graduation_year)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Update a live alumni record.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAlumni,
    ) -> Result<Option<Alumni>, sqlx::Error> {
        let query = format!(
            "UPDATE alumni SET
                name = $2,
                major = $3,
                cohort_year = $4,
                graduation_year = $5,
                email = $6,
                phone = $7,
                address = $8,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alumni>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.major)
            .bind(input.cohort_year)
            .bind(input.graduation_year)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an alumni record by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alumni SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store the path of an uploaded document on a live record.
    pub async fn set_upload_path(
        pool: &PgPool,
        id: DbId,
        kind: UploadKind,
        path: &str,
    ) -> Result<bool, sqlx::Error> {
        let column = match kind {
            UploadKind::Photo => "photo_path",
            UploadKind::Certificate => "certificate_path",
        };
        let query = format!(
            "UPDATE alumni SET {column} = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
