//! HTTP-level tests for the `/alumni` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, TestApp};
use serde_json::json;

fn alumni_body(name: &str) -> serde_json::Value {
    json!({
        "student_number": "2016001",
        "name": name,
        "major": "Informatics",
        "cohort_year": 2016,
        "graduation_year": 2020,
        "email": format!("{}@alumni.test", name.to_lowercase()),
    })
}

#[tokio::test]
async fn user_creates_own_record_even_when_naming_another_owner() {
    let app = TestApp::new();
    let (user, token) = app.login_as("ann", "user").await;

    let mut body = alumni_body("Ann");
    body["user_id"] = json!(user.id + 100);
    let response = post_json_auth(app.router(), "/api/v1/alumni", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user.id);
    assert_eq!(json["data"]["name"], "Ann");
    assert!(json["data"].get("deleted_at").is_none());
}

#[tokio::test]
async fn list_paginates_and_echoes_meta() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("admin", "admin").await;
    for name in ["Cara", "Ann", "Bob"] {
        app.create_alumni(&owner, name).await;
    }

    let response = get_auth(
        app.router(),
        "/api/v1/alumni?page=1&limit=2&sortBy=name&order=desc",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Cara", "Bob"]);
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["limit"], 2);
    assert_eq!(json["meta"]["total"], 3);
    assert_eq!(json["meta"]["pages"], 2);
    assert_eq!(json["meta"]["sortBy"], "name");
    assert_eq!(json["meta"]["order"], "desc");
    assert_eq!(json["meta"]["search"], "");
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("admin", "admin").await;
    app.create_alumni(&owner, "Ann").await;

    for path in [
        "/api/v1/alumni?page=9223372036854775807&limit=10",
        "/api/v1/pekerjaan?page=9223372036854775807&limit=100",
    ] {
        let response = get_auth(app.router(), path, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let json = body_json(response).await;
        assert!(json["data"].as_array().unwrap().is_empty(), "{path}");
        assert_eq!(json["meta"]["page"], i64::MAX);
    }
}

#[tokio::test]
async fn unknown_sort_field_falls_back_to_id() {
    let app = TestApp::new();
    let (_, token) = app.login_as("ann", "user").await;

    let response = get_auth(
        app.router(),
        "/api/v1/alumni?sortBy=password;drop&order=sideways",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meta"]["sortBy"], "id");
    assert_eq!(json["meta"]["order"], "asc");
    assert_eq!(json["meta"]["total"], 0);
    assert_eq!(json["meta"]["pages"], 0);
}

#[tokio::test]
async fn search_matches_name_major_or_email() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("admin", "admin").await;
    app.create_alumni(&owner, "Ann").await;
    app.create_alumni(&owner, "Bob").await;

    let response = get_auth(app.router(), "/api/v1/alumni?search=BOB", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["meta"]["search"], "BOB");
    assert_eq!(json["data"][0]["name"], "Bob");
}

#[tokio::test]
async fn soft_deleted_alumni_disappears() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;
    let uri = format!("/api/v1/alumni/{}", alumni.id);

    let response = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], alumni.id);

    let response = get_auth(app.router(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.router(), "/api/v1/alumni", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 0);
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = put_json_auth(app.router(), &uri, alumni_body("Ann"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn strangers_cannot_update_or_delete() {
    let app = TestApp::new();
    let (owner, _) = app.login_as("ann", "user").await;
    let (_, stranger) = app.login_as("mallory", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;
    let uri = format!("/api/v1/alumni/{}", alumni.id);

    let response = put_json_auth(app.router(), &uri, alumni_body("Mallory"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.router(), &uri, &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_updates_any_record() {
    let app = TestApp::new();
    let (owner, _) = app.login_as("ann", "user").await;
    let (_, admin) = app.login_as("root", "admin").await;
    let alumni = app.create_alumni(&owner, "Ann").await;

    let mut body = alumni_body("Ann Updated");
    body["phone"] = json!("0812");
    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/alumni/{}", alumni.id),
        body,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ann Updated");
    assert_eq!(json["data"]["phone"], "0812");
    assert_eq!(json["data"]["user_id"], owner.id);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = TestApp::new();
    let (_, token) = app.login_as("ann", "user").await;

    let response = get_auth(app.router(), "/api/v1/alumni/abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
