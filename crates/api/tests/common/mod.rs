#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use alumni_api::auth::jwt::{generate_access_token, JwtConfig};
use alumni_api::auth::password::hash_password;
use alumni_api::config::{ServerConfig, StoreBackend, StoreConfig};
use alumni_api::router::build_app_router;
use alumni_api::state::AppState;
use alumni_db::models::alumni::{Alumni, NewAlumni};
use alumni_db::models::user::{CreateUser, User};
use alumni_db::Stores;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret1";
pub const MULTIPART_BOUNDARY: &str = "alumni-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given upload root.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreConfig {
            backend: StoreBackend::Postgres {
                database_url: "postgres://unused".to_string(),
            },
            timeout: Duration::from_secs(10),
        },
        upload_dir: upload_dir.to_path_buf(),
        upload_body_limit_bytes: 10 * 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_hours: 1,
        },
    }
}

/// The full router over an in-memory backend and a temporary upload root.
pub struct TestApp {
    pub stores: Stores,
    pub config: ServerConfig,
    upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("temp dir");
        let config = test_config(upload_dir.path());
        Self {
            stores: Stores::memory(),
            config,
            upload_dir,
        }
    }

    /// A fresh router sharing this app's stores. `oneshot` consumes the
    /// router, so call this once per request.
    pub fn router(&self) -> Router {
        build_app_router(AppState::new(self.stores.clone(), self.config.clone()))
    }

    pub fn upload_root(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Insert a user directly with password [`TEST_PASSWORD`].
    pub async fn create_user(&self, username: &str, role: &str) -> User {
        let input = CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
        };
        self.stores
            .users
            .create_user(&input)
            .await
            .expect("user creation should succeed")
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.username, &user.role, &self.config.jwt)
            .expect("token generation should succeed")
    }

    /// Create a user and return it with a bearer token.
    pub async fn login_as(&self, username: &str, role: &str) -> (User, String) {
        let user = self.create_user(username, role).await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn create_alumni(&self, owner: &User, name: &str) -> Alumni {
        self.stores
            .alumni
            .create_alumni(&NewAlumni {
                student_number: format!("NIM-{name}"),
                name: name.to_string(),
                major: "Informatics".to_string(),
                cohort_year: 2016,
                graduation_year: 2020,
                email: format!("{}@alumni.test", name.to_lowercase()),
                phone: String::new(),
                address: String::new(),
                user_id: owner.id,
            })
            .await
            .expect("alumni creation should succeed")
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::PUT, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// POST a single-part multipart body with field `file`.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
    token: &str,
) -> Response<Body> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
