//! HTTP-level tests for the employment-record trash lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_auth, TestApp};
use serde_json::json;

async fn seeded_record(app: &TestApp, owner_token: &str, alumni_id: i64) -> i64 {
    let response = post_json_auth(
        app.router(),
        "/api/v1/pekerjaan",
        json!({
            "alumni_id": alumni_id,
            "company_name": "Acme",
            "job_title": "Engineer",
            "start_date": "2020-01-01",
        }),
        owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn admin_soft_delete_then_restore_scenario() {
    let app = TestApp::new();
    let (u1, u1_token) = app.login_as("u1", "user").await;
    let (_, admin) = app.login_as("root", "admin").await;
    let alumni = app.create_alumni(&u1, "Ann").await;
    let id = seeded_record(&app, &u1_token, alumni.id).await;
    let uri = format!("/api/v1/pekerjaan/{id}");

    let original = body_json(get_auth(app.router(), &uri, &admin).await).await["data"].clone();

    let response = delete_auth(app.router(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.router(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_auth(app.router(), &format!("{uri}/restore"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.router(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let restored = body_json(response).await["data"].clone();
    assert!(restored.get("deleted_at").is_none());
    assert_eq!(restored, original);
}

#[tokio::test]
async fn hard_delete_of_live_record_is_404() {
    let app = TestApp::new();
    let (u1, token) = app.login_as("u1", "user").await;
    let alumni = app.create_alumni(&u1, "Ann").await;
    let id = seeded_record(&app, &token, alumni.id).await;

    let response = delete_auth(
        app.router(),
        &format!("/api/v1/pekerjaan/{id}/permanent"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still there.
    let response = get_auth(app.router(), &format!("/api/v1/pekerjaan/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn owner_trashes_and_purges() {
    let app = TestApp::new();
    let (u1, token) = app.login_as("u1", "user").await;
    let alumni = app.create_alumni(&u1, "Ann").await;
    let id = seeded_record(&app, &token, alumni.id).await;
    let uri = format!("/api/v1/pekerjaan/{id}");

    delete_auth(app.router(), &uri, &token).await;

    let response = get_auth(app.router(), "/api/v1/pekerjaan/trash", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["id"], id);
    assert!(json["data"][0]["deleted_at"].is_string());

    let response = delete_auth(app.router(), &format!("{uri}/permanent"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_auth(app.router(), &format!("{uri}/restore"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app.router(), "/api/v1/pekerjaan/trash", &token).await).await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn strangers_are_forbidden_on_every_verb() {
    let app = TestApp::new();
    let (u1, token) = app.login_as("u1", "user").await;
    let (u2, stranger) = app.login_as("u2", "user").await;
    app.create_alumni(&u2, "Mallory").await;
    let alumni = app.create_alumni(&u1, "Ann").await;
    let id = seeded_record(&app, &token, alumni.id).await;
    let uri = format!("/api/v1/pekerjaan/{id}");

    let response = delete_auth(app.router(), &uri, &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    delete_auth(app.router(), &uri, &token).await;

    let response = put_auth(app.router(), &format!("{uri}/restore"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.router(), &format!("{uri}/permanent"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The stranger's trash does not include it.
    let json = body_json(get_auth(app.router(), "/api/v1/pekerjaan/trash", &stranger).await).await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn trash_for_user_without_alumni_is_404() {
    let app = TestApp::new();
    let (_, token) = app.login_as("lonely", "user").await;

    let response = get_auth(app.router(), "/api/v1/pekerjaan/trash", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_sees_whole_trash() {
    let app = TestApp::new();
    let (u1, t1) = app.login_as("u1", "user").await;
    let (u2, t2) = app.login_as("u2", "user").await;
    let (_, admin) = app.login_as("root", "admin").await;
    let a1 = app.create_alumni(&u1, "Ann").await;
    let a2 = app.create_alumni(&u2, "Bob").await;
    let r1 = seeded_record(&app, &t1, a1.id).await;
    let r2 = seeded_record(&app, &t2, a2.id).await;

    delete_auth(app.router(), &format!("/api/v1/pekerjaan/{r1}"), &t1).await;
    delete_auth(app.router(), &format!("/api/v1/pekerjaan/{r2}"), &t2).await;

    let json = body_json(get_auth(app.router(), "/api/v1/pekerjaan/trash", &admin).await).await;
    assert_eq!(json["count"], 2);
}
