//! Uploaded-file metadata.

use alumni_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `files` table. Describes a file on disk; deleting the row
/// does not touch the file.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FileRecord {
    pub id: DbId,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub uploaded_at: Timestamp,
}

/// Input for inserting file metadata.
#[derive(Debug, Clone)]
pub struct CreateFile {
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
}
