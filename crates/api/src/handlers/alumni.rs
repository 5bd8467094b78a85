//! Handlers for the `/alumni` resource.

use alumni_core::types::DbId;
use alumni_db::models::alumni::{Alumni, CreateAlumni, UpdateAlumni};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{ActionResult, DataResponse, ListMeta, ListResponse};
use crate::services::alumni;
use crate::state::AppState;

/// GET /api/v1/alumni
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<Alumni>>> {
    let query = params.alumni_query();
    let (data, total) = alumni::list(&state.stores, &query).await?;
    let meta = ListMeta::new(&query, query.sort.column(), total);
    Ok(Json(ListResponse { data, meta }))
}

/// POST /api/v1/alumni
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateAlumni>,
) -> AppResult<(StatusCode, Json<DataResponse<Alumni>>)> {
    let created = alumni::create(&state.stores, &user.actor(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/alumni/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Alumni>>> {
    let found = alumni::get(&state.stores, id).await?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/alumni/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAlumni>,
) -> AppResult<Json<DataResponse<Alumni>>> {
    let updated = alumni::update(&state.stores, &user.actor(), id, input).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/alumni/{id}
///
/// Soft delete: the record disappears from reads but stays owned.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    alumni::soft_delete(&state.stores, &user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: ActionResult {
            id,
            message: "Alumni moved to trash",
        },
    }))
}
