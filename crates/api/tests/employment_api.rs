//! HTTP-level tests for the `/pekerjaan` resource.

mod common;

use alumni_db::models::alumni::Alumni;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth, TestApp};
use serde_json::json;

fn record_body(alumni: &Alumni, company: &str, salary: i64) -> serde_json::Value {
    json!({
        "alumni_id": alumni.id,
        "company_name": company,
        "job_title": "Engineer",
        "industry": "Software",
        "location": "Jakarta",
        "salary_range": salary,
        "start_date": "2021-02-01",
        "status": "active",
    })
}

async fn create_record(app: &TestApp, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app.router(), "/api/v1/pekerjaan", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[tokio::test]
async fn owner_creates_and_reads_record() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;

    let mut body = record_body(&alumni, "Acme", 5_000_000);
    body["end_date"] = json!("2023-01-31");
    let created = create_record(&app, &token, body).await;
    assert_eq!(created["alumni_id"], alumni.id);
    assert_eq!(created["start_date"], "2021-02-01");
    assert_eq!(created["end_date"], "2023-01-31");

    let response = get_auth(
        app.router(),
        &format!("/api/v1/pekerjaan/{}", created["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], created);

    let response = get_auth(
        app.router(),
        &format!("/api/v1/pekerjaan/alumni/{}", alumni.id),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bad_dates_and_missing_fields_are_400() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;

    let mut bad_start = record_body(&alumni, "Acme", 1);
    bad_start["start_date"] = json!("01-02-2021");
    let mut bad_end = record_body(&alumni, "Acme", 1);
    bad_end["end_date"] = json!("soon");
    let no_company = record_body(&alumni, "", 1);

    for body in [bad_start, bad_end, no_company] {
        let response = post_json_auth(app.router(), "/api/v1/pekerjaan", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn creating_for_missing_or_foreign_alumni_fails() {
    let app = TestApp::new();
    let (owner, _) = app.login_as("ann", "user").await;
    let (_, stranger) = app.login_as("mallory", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/pekerjaan",
        record_body(&alumni, "Acme", 1),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let mut missing = record_body(&alumni, "Acme", 1);
    missing["alumni_id"] = json!(alumni.id + 1000);
    let response = post_json_auth(app.router(), "/api/v1/pekerjaan", missing, &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_revalidates_and_checks_owner() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let (_, stranger) = app.login_as("mallory", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;
    let created = create_record(&app, &token, record_body(&alumni, "Acme", 1)).await;
    let uri = format!("/api/v1/pekerjaan/{}", created["id"]);

    let mut body = record_body(&alumni, "Globex", 9_000_000);
    let response = put_json_auth(app.router(), &uri, body.clone(), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    body["start_date"] = json!("2021-13-01");
    let response = put_json_auth(app.router(), &uri, body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    body["start_date"] = json!("2021-03-01");
    let response = put_json_auth(app.router(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["company_name"], "Globex");
    assert_eq!(json["data"]["salary_range"], 9_000_000);
    assert_eq!(json["data"]["start_date"], "2021-03-01");
}

#[tokio::test]
async fn list_searches_and_sorts_with_defaults() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let alumni = app.create_alumni(&owner, "Ann").await;
    for company in ["Acme", "Globex", "Acme Labs"] {
        create_record(&app, &token, record_body(&alumni, company, 1)).await;
    }

    let response = get_auth(
        app.router(),
        "/api/v1/pekerjaan?search=acme&sortBy=company_name&order=desc&limit=1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["meta"]["pages"], 2);
    assert_eq!(json["meta"]["sortBy"], "company_name");
    assert_eq!(json["data"][0]["company_name"], "Acme Labs");

    let response = get_auth(app.router(), "/api/v1/pekerjaan?sortBy=salary", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["sortBy"], "created_at");
    assert_eq!(json["meta"]["total"], 3);
}

#[tokio::test]
async fn graduates_report_is_admin_only() {
    let app = TestApp::new();
    let (owner, token) = app.login_as("ann", "user").await;
    let (_, admin) = app.login_as("root", "admin").await;
    let alumni = app.create_alumni(&owner, "Ann").await;
    create_record(&app, &token, record_body(&alumni, "Cheap", 3_000_000)).await;
    create_record(&app, &token, record_body(&alumni, "Rich", 4_500_000)).await;

    let response = get_auth(app.router(), "/api/v1/pekerjaan/tahun-lulus/2020", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.router(), "/api/v1/pekerjaan/tahun-lulus/2020", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["company_name"], "Rich");
    assert_eq!(json["data"][0]["name"], "Ann");
}
