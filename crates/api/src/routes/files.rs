//! Route definitions for the `/files` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`. Request bodies are capped at
/// `upload_body_limit` bytes; per-kind size limits are enforced on top.
///
/// ```text
/// GET    /                                -> list
/// GET    /{id}                            -> get_by_id
/// DELETE /{id}                            -> delete
/// POST   /upload-foto/{alumni_id}         -> upload_photo
/// POST   /upload-sertifikat/{alumni_id}   -> upload_certificate
/// ```
pub fn router(upload_body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(files::list))
        .route("/{id}", get(files::get_by_id).delete(files::delete))
        .route("/upload-foto/{alumni_id}", post(files::upload_photo))
        .route(
            "/upload-sertifikat/{alumni_id}",
            post(files::upload_certificate),
        )
        .layer(DefaultBodyLimit::max(upload_body_limit))
}
