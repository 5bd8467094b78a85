//! Handlers for the `/files` resource.

use alumni_core::types::DbId;
use alumni_core::uploads::UploadKind;
use alumni_db::models::file::FileRecord;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::auth::AuthUser;
use crate::response::{ActionResult, DataResponse};
use crate::services::files::{self, IncomingFile};
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Pull the `file` part out of a multipart body.
///
/// A body that is not multipart at all counts as "no file", so ownership is
/// still checked first by the service.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Option<IncomingFile>> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return Ok(Some(IncomingFile {
            original_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}

async fn upload(
    state: AppState,
    user: AuthUser,
    kind: UploadKind,
    alumni_id: DbId,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<FileRecord>>> {
    let file = read_file_field(multipart).await?;
    let record = files::upload(
        &state.stores,
        &state.uploads,
        &user.actor(),
        kind,
        alumni_id,
        file,
    )
    .await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/files/upload-foto/{alumni_id}
///
/// Multipart field `file`; JPEG or PNG up to 1 MB.
pub async fn upload_photo(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(alumni_id): AppPath<DbId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<FileRecord>>> {
    upload(state, user, UploadKind::Photo, alumni_id, multipart).await
}

/// POST /api/v1/files/upload-sertifikat/{alumni_id}
///
/// Multipart field `file`; PDF up to 2 MB.
pub async fn upload_certificate(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(alumni_id): AppPath<DbId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<FileRecord>>> {
    upload(state, user, UploadKind::Certificate, alumni_id, multipart).await
}

/// GET /api/v1/files
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FileRecord>>>> {
    let records = files::list(&state.stores).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/files/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<FileRecord>>> {
    let record = files::get(&state.stores, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    files::delete(&state.stores, &state.uploads, id).await?;
    Ok(Json(DataResponse {
        data: ActionResult {
            id,
            message: "File deleted",
        },
    }))
}
