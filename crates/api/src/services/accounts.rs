//! Registration and login.

use alumni_core::error::CoreError;
use alumni_core::roles::resolve_role;
use alumni_db::models::user::{CreateUser, UserResponse};
use alumni_db::{StoreError, Stores};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login: the user and a bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Create a user account. The password is stored as an Argon2id hash.
pub async fn register(stores: &Stores, input: RegisterRequest) -> AppResult<UserResponse> {
    // 1. Required fields, before touching the store.
    let username = input.username.trim();
    if username.is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username, email and password are required".into(),
        )));
    }

    // 2. Role defaults to "user".
    let role = resolve_role(input.role.as_deref())?;

    // 3. Hash and insert.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: username.to_string(),
        email: input.email.trim().to_string(),
        password_hash,
        role: role.to_string(),
    };

    match stores.users.create_user(&create).await {
        Ok(user) => {
            tracing::info!(
                user_id = user.id,
                username = %user.username,
                role = %user.role,
                "User registered"
            );
            Ok(user.into())
        }
        Err(StoreError::Duplicate(_)) => Err(AppError::Core(CoreError::Validation(
            "Username already exists".into(),
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Verify credentials and issue an access token.
///
/// An unknown username and a wrong password fail identically.
pub async fn login(
    stores: &Stores,
    jwt: &JwtConfig,
    input: LoginRequest,
) -> AppResult<LoginResponse> {
    let user = stores
        .users
        .find_user_by_username(input.username.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.username, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(LoginResponse {
        user: user.into(),
        token,
    })
}
