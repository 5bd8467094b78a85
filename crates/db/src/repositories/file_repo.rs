//! Repository for the `files` table.

use alumni_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{CreateFile, FileRecord};

const COLUMNS: &str = "id, file_name, original_name, file_path, file_size, file_type, uploaded_at";

/// Provides insert, lookup and delete for uploaded-file metadata.
pub struct FileRepo;

impl FileRepo {
    pub async fn create(pool: &PgPool, input: &CreateFile) -> Result<FileRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO files (file_name, original_name, file_path, file_size, file_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(&input.file_name)
            .bind(&input.original_name)
            .bind(&input.file_path)
            .bind(input.file_size)
            .bind(&input.file_type)
            .fetch_one(pool)
            .await
    }

    /// All files, newest upload first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, FileRecord>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE id = $1");
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a metadata row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
