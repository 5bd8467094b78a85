//! Route definitions for the `/pekerjaan` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::employment;
use crate::state::AppState;

/// Routes mounted at `/pekerjaan`.
///
/// ```text
/// GET    /                        -> list (?page&limit&search&sortBy&order)
/// POST   /                        -> create
/// GET    /trash                   -> list_trashed
/// GET    /alumni/{alumni_id}      -> list_by_alumni
/// GET    /tahun-lulus/{year}      -> graduates_by_year (admin)
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> soft_delete
/// PUT    /{id}/restore            -> restore
/// DELETE /{id}/permanent          -> hard_delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employment::list).post(employment::create))
        .route("/trash", get(employment::list_trashed))
        .route("/alumni/{alumni_id}", get(employment::list_by_alumni))
        .route("/tahun-lulus/{year}", get(employment::graduates_by_year))
        .route(
            "/{id}",
            get(employment::get_by_id)
                .put(employment::update)
                .delete(employment::soft_delete),
        )
        .route("/{id}/restore", put(employment::restore))
        .route("/{id}/permanent", delete(employment::hard_delete))
}
