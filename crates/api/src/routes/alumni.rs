//! Route definitions for the `/alumni` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::alumni;
use crate::state::AppState;

/// Routes mounted at `/alumni`.
///
/// ```text
/// GET    /       -> list (?page&limit&search&sortBy&order)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alumni::list).post(alumni::create))
        .route(
            "/{id}",
            get(alumni::get_by_id)
                .put(alumni::update)
                .delete(alumni::delete),
        )
}
