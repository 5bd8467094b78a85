//! Handlers for registration and login.

use alumni_db::models::user::UserResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::services::accounts::{self, LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;

/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = accounts::register(&state.stores, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /api/v1/login
///
/// Unknown usernames and wrong passwords both answer 401.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let response = accounts::login(&state.stores, &state.config.jwt, input).await?;
    Ok(Json(DataResponse { data: response }))
}
