mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{assert_cors_safe, send, unreachable_router, TestApp, TEST_ORIGIN};
use serde_json::json;

const ROUTED_PATHS: [&str; 5] = ["/", "/api/", "/api/health", "/api/status", "/api/contact"];

fn preflight(uri: &str, method: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("Origin", TEST_ORIGIN)
        .header("Access-Control-Request-Method", method)
        .header("Access-Control-Request-Headers", "content-type, x-custom-header")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn preflight_succeeds_on_every_routed_path() {
    let app = TestApp::spawn();

    for uri in ROUTED_PATHS {
        let response = send(&app.router, preflight(uri, "POST")).await;

        assert_eq!(response.status, StatusCode::OK, "uri {}", uri);
        assert!(response.body.is_null(), "preflight body must be empty");
        assert_cors_safe(&response.headers);

        let methods = response.headers["access-control-allow-methods"]
            .to_str()
            .unwrap();
        for method in ["GET", "POST", "OPTIONS"] {
            assert!(methods.contains(method), "{} missing from {}", method, methods);
        }
        assert_eq!(response.headers["access-control-allow-headers"], "*");
    }
}

#[tokio::test]
async fn preflight_does_not_reach_the_store() {
    let response = send(&unreachable_router(), preflight("/api/status", "POST")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_cors_safe(&response.headers);
}

#[tokio::test]
async fn every_kind_of_response_carries_allow_origin() {
    let app = TestApp::spawn();

    let ok = app.get("/api/health").await;
    let created = app
        .post("/api/status", json!({ "client_name": "acme" }))
        .await;
    let invalid = app.post("/api/contact", json!({ "user_name": "x" })).await;
    let missing = app.get("/nope").await;
    let wrong_method = app.request(Method::PATCH, "/api/status", None).await;

    for response in [&ok, &created, &invalid, &missing, &wrong_method] {
        assert_cors_safe(&response.headers);
    }
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(wrong_method.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn server_errors_carry_allow_origin() {
    let response = send(
        &unreachable_router(),
        Request::builder()
            .uri("/api/contact")
            .header("Origin", TEST_ORIGIN)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_safe(&response.headers);
}

#[tokio::test]
async fn same_origin_request_is_served_normally() {
    let app = TestApp::spawn();

    let response = send(
        &app.router,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response
        .headers
        .contains_key("access-control-allow-credentials"));
}

#[tokio::test]
async fn plain_options_is_routed_like_any_other_method() {
    let app = TestApp::spawn();

    let response = app.request(Method::OPTIONS, "/api/status", None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, json!({ "detail": "Method Not Allowed" }));
    assert_cors_safe(&response.headers);
    assert!(!response
        .headers
        .contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn plain_options_on_unknown_path_is_404() {
    let app = TestApp::spawn();

    let response = app.request(Method::OPTIONS, "/api/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "detail": "Not Found" }));
    assert_cors_safe(&response.headers);
}
