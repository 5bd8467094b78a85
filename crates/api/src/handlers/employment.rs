//! Handlers for the `/pekerjaan` (employment record) resource.
//!
//! Besides CRUD this covers the trash lifecycle:
//! live -> trashed (`DELETE /{id}`), trashed -> live (`PUT /{id}/restore`)
//! and trashed -> gone (`DELETE /{id}/permanent`).

use alumni_core::types::DbId;
use alumni_db::models::employment::{
    CreateEmployment, EmploymentFields, EmploymentRecord, GraduateEmployment,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{ActionResult, CountedResponse, DataResponse, ListMeta, ListResponse};
use crate::services::employment;
use crate::state::AppState;

/// GET /api/v1/pekerjaan
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<ListResponse<EmploymentRecord>>> {
    let query = params.employment_query();
    let (data, total) = employment::list(&state.stores, &query).await?;
    let meta = ListMeta::new(&query, query.sort.column(), total);
    Ok(Json(ListResponse { data, meta }))
}

/// POST /api/v1/pekerjaan
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateEmployment>,
) -> AppResult<(StatusCode, Json<DataResponse<EmploymentRecord>>)> {
    let record = employment::create(&state.stores, &user.actor(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/pekerjaan/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<EmploymentRecord>>> {
    let record = employment::get(&state.stores, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/pekerjaan/alumni/{alumni_id}
pub async fn list_by_alumni(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(alumni_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<EmploymentRecord>>>> {
    let records = employment::list_by_alumni(&state.stores, alumni_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// PUT /api/v1/pekerjaan/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EmploymentFields>,
) -> AppResult<Json<DataResponse<EmploymentRecord>>> {
    let record = employment::update(&state.stores, &user.actor(), id, input).await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/pekerjaan/{id}
pub async fn soft_delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    employment::soft_delete(&state.stores, &user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: ActionResult {
            id,
            message: "Employment record moved to trash",
        },
    }))
}

/// PUT /api/v1/pekerjaan/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    employment::restore(&state.stores, &user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: ActionResult {
            id,
            message: "Employment record restored",
        },
    }))
}

/// DELETE /api/v1/pekerjaan/{id}/permanent
///
/// Only trashed records can be removed; a live id answers 404.
pub async fn hard_delete(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    employment::hard_delete(&state.stores, &user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: ActionResult {
            id,
            message: "Employment record permanently deleted",
        },
    }))
}

/// GET /api/v1/pekerjaan/trash
pub async fn list_trashed(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<CountedResponse<EmploymentRecord>>> {
    let records = employment::list_trashed(&state.stores, &user.actor()).await?;
    Ok(Json(CountedResponse::new(records)))
}

/// GET /api/v1/pekerjaan/tahun-lulus/{year}
pub async fn graduates_by_year(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(year): AppPath<i32>,
) -> AppResult<Json<CountedResponse<GraduateEmployment>>> {
    let rows = employment::graduates_with_salary(&state.stores, year).await?;
    Ok(Json(CountedResponse::new(rows)))
}
