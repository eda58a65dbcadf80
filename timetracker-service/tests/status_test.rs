mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{assert_cors_safe, unreachable_router, TestApp};
use serde_json::json;
use timetracker_service::models::StatusCheck;
use timetracker_service::services::Store;

#[tokio::test]
async fn create_status_check_returns_full_record() {
    let app = TestApp::spawn();

    let response = app
        .post("/api/status", json!({ "client_name": "acme" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["client_name"], "acme");

    let id = response.body["id"].as_str().expect("id missing");
    assert!(!id.is_empty());

    let timestamp = response.body["timestamp"].as_str().expect("timestamp missing");
    let timestamp = DateTime::parse_from_rfc3339(timestamp).expect("timestamp is not RFC 3339");
    assert_eq!(timestamp.offset().local_minus_utc(), 0);
    let drift = Utc::now().signed_duration_since(timestamp.with_timezone(&Utc));
    assert!(drift.num_seconds().abs() < 5, "timestamp drifted by {}", drift);
}

#[tokio::test]
async fn created_status_check_is_listed() {
    let app = TestApp::spawn();

    let created = app
        .post("/api/status", json!({ "client_name": "acme" }))
        .await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let listed = app.get("/api/status").await;
    assert_eq!(listed.status, StatusCode::OK);

    let records = listed.body.as_array().expect("expected a JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], id.as_str());
    assert_eq!(records[0]["client_name"], "acme");
}

#[tokio::test]
async fn identical_requests_create_distinct_records() {
    let app = TestApp::spawn();

    let first = app
        .post("/api/status", json!({ "client_name": "acme" }))
        .await;
    let second = app
        .post("/api/status", json!({ "client_name": "acme" }))
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_ne!(first.body["id"], second.body["id"]);

    let listed = app.get("/api/status").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn status_checks_are_listed_in_insertion_order() {
    let app = TestApp::spawn_deterministic();

    for name in ["first", "second", "third"] {
        app.post("/api/status", json!({ "client_name": name })).await;
    }

    let listed = app.get("/api/status").await;
    let names: Vec<_> = listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["client_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(listed.body[0]["id"], "id-1");
}

#[tokio::test]
async fn missing_client_name_is_rejected_before_store() {
    let app = TestApp::spawn();

    let response = app.post("/api/status", json!({ "name": "acme" })).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = response.body["detail"].as_str().unwrap();
    assert!(detail.contains("client_name"), "detail: {}", detail);
    assert_cors_safe(&response.headers);

    assert!(app.store.list_status_checks(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_client_name_fails_validation() {
    let app = TestApp::spawn();

    let response = app.post("/api/status", json!({ "client_name": "" })).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["detail"]
        .as_str()
        .unwrap()
        .contains("client_name"));
    assert!(app.store.list_status_checks(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let app = TestApp::spawn();

    let response = common::send(
        &app.router,
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/status")
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from("{\"client_name\":"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"].is_string());
}

#[tokio::test]
async fn status_list_is_capped_at_one_thousand() {
    let app = TestApp::spawn();

    for i in 0..1005 {
        app.store
            .insert_status_check(&StatusCheck {
                id: format!("seed-{}", i),
                client_name: "bulk".to_string(),
                timestamp: Utc::now(),
            })
            .await
            .unwrap();
    }

    let listed = app.get("/api/status").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1000);
}

#[tokio::test]
async fn store_failure_is_generic_500() {
    let router = unreachable_router();

    let create = common::send(
        &router,
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/status")
            .header("Origin", common::TEST_ORIGIN)
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from(r#"{"client_name":"acme"}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(create.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(create.body, json!({ "detail": "Internal server error" }));
    assert_cors_safe(&create.headers);

    let list = common::send(
        &router,
        axum::http::Request::builder()
            .uri("/api/status")
            .header("Origin", common::TEST_ORIGIN)
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list.body, json!({ "detail": "Internal server error" }));
    assert!(!list.body.to_string().contains("10.9.8.7"));
}
