pub mod alumni;
pub mod auth;
pub mod employment;
pub mod files;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /register, /login                                public
///
/// /alumni                                          list, create
/// /alumni/{id}                                     get, update, soft delete
///
/// /pekerjaan                                       list, create
/// /pekerjaan/trash                                 trashed records (owner-scoped)
/// /pekerjaan/alumni/{alumni_id}                    records of one alumni
/// /pekerjaan/tahun-lulus/{year}                    salary report (admin)
/// /pekerjaan/{id}                                  get, update, soft delete
/// /pekerjaan/{id}/restore                          restore (PUT)
/// /pekerjaan/{id}/permanent                        hard delete (DELETE)
///
/// /files                                           list
/// /files/{id}                                      get, delete
/// /files/upload-foto/{alumni_id}                   photo upload (multipart)
/// /files/upload-sertifikat/{alumni_id}             certificate upload (multipart)
/// ```
pub fn api_routes(upload_body_limit: usize) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/alumni", alumni::router())
        .nest("/pekerjaan", employment::router())
        .nest("/files", files::router(upload_body_limit))
}
