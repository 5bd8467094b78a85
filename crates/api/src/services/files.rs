//! Uploads and file metadata.

use alumni_core::access::Actor;
use alumni_core::error::CoreError;
use alumni_core::types::DbId;
use alumni_core::uploads::{stored_file_name, UploadKind};
use alumni_db::models::file::{CreateFile, FileRecord};
use alumni_db::Stores;
use axum::body::Bytes;
use std::path::Path;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::storage::UploadStorage;

const ENTITY: &str = "File";

/// A file part pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Store an uploaded photo or certificate for `alumni_id`.
///
/// Steps, in order: ownership (non-admins must own the alumni, trashed ones
/// included), presence of the file, size and type limits, physical write,
/// metadata insert. If the insert fails the written file is removed again.
pub async fn upload(
    stores: &Stores,
    storage: &UploadStorage,
    actor: &Actor,
    kind: UploadKind,
    alumni_id: DbId,
    file: Option<IncomingFile>,
) -> AppResult<FileRecord> {
    // 1. Ownership.
    if !actor.is_admin() {
        let owned = stores.alumni.list_alumni_by_owner(actor.user_id).await?;
        if !owned.iter().any(|a| a.id == alumni_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You may only upload files for your own alumni record".into(),
            )));
        }
    }

    // 2. Presence and limits.
    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    kind.validate(file.data.len(), &file.content_type)?;

    // 3. Physical write.
    let token = uuid::Uuid::new_v4().to_string();
    let file_name = stored_file_name(kind, alumni_id, &token, &file.original_name);
    let path = storage
        .save(kind, &file_name, &file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;
    let file_path = path.to_string_lossy().into_owned();

    // 4. Metadata, compensating on failure.
    let input = CreateFile {
        file_name,
        original_name: file.original_name,
        file_path: file_path.clone(),
        file_size: file.data.len() as i64,
        file_type: file.content_type,
    };
    let record = match stores.files.create_file(&input).await {
        Ok(record) => record,
        Err(e) => {
            storage.remove_best_effort(&path).await;
            return Err(e.into());
        }
    };

    // 5. Link the upload to the alumni profile.
    match stores.alumni.attach_upload(alumni_id, kind, &file_path).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(alumni_id, "No live alumni to link upload to");
        }
        Err(e) => {
            tracing::warn!(alumni_id, error = %e, "Failed to link upload to alumni");
        }
    }

    tracing::info!(
        file_id = record.id,
        alumni_id,
        kind = ?kind,
        size = record.file_size,
        "File uploaded"
    );
    Ok(record)
}

pub async fn list(stores: &Stores) -> AppResult<Vec<FileRecord>> {
    Ok(stores.files.list_files().await?)
}

pub async fn get(stores: &Stores, id: DbId) -> AppResult<FileRecord> {
    stores
        .files
        .find_file(id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Remove the physical file (best effort) and then its metadata.
pub async fn delete(stores: &Stores, storage: &UploadStorage, id: DbId) -> AppResult<()> {
    let record = get(stores, id).await?;
    storage.remove_best_effort(Path::new(&record.file_path)).await;

    if !stores.files.delete_file(id).await? {
        return Err(not_found(ENTITY, id));
    }
    tracing::info!(file_id = id, "File deleted");
    Ok(())
}
