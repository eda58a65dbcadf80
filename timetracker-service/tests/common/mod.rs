#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use service_core::error::AppError;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use timetracker_service::config::TimeTrackerConfig;
use timetracker_service::models::{ContactMessage, StatusCheck};
use timetracker_service::services::{Clock, IdGenerator, MemoryStore, Store};
use timetracker_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

pub const TEST_ORIGIN: &str = "https://timetracker.example.pl";

/// Clock that moves forward one second on every read.
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

/// Predictable ids: `id-1`, `id-2`, ...
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Store whose every call fails the way an unreachable MongoDB does.
pub struct UnreachableStore;

fn unreachable() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(
        "Server selection timeout: No available servers at 10.9.8.7:27017"
    ))
}

#[async_trait]
impl Store for UnreachableStore {
    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn insert_status_check(&self, _status_check: &StatusCheck) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn list_status_checks(&self, _limit: usize) -> Result<Vec<StatusCheck>, AppError> {
        Err(unreachable())
    }

    async fn insert_contact_message(&self, _message: &ContactMessage) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn list_contact_messages(&self, _limit: usize) -> Result<Vec<ContactMessage>, AppError> {
        Err(unreachable())
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Router over an empty in-memory store with the real clock and ids.
    pub fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(TimeTrackerConfig::default(), store.clone());
        Self::from_state(state, store)
    }

    /// Router with a stepping clock and sequential ids.
    pub fn spawn_deterministic() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(TimeTrackerConfig::default(), store.clone())
            .with_clock(Arc::new(SteppingClock::new()))
            .with_id_generator(Arc::new(SequentialIds::default()));
        Self::from_state(state, store)
    }

    fn from_state(state: AppState, store: Arc<MemoryStore>) -> Self {
        let router = build_router(state).expect("Failed to build router");
        Self { router, store }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Origin", TEST_ORIGIN);

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        send(&self.router, builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }
}

/// Router backed by [`UnreachableStore`].
pub fn unreachable_router() -> Router {
    let state = AppState::new(TimeTrackerConfig::default(), Arc::new(UnreachableStore));
    build_router(state).expect("Failed to build router")
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn assert_cors_safe(headers: &HeaderMap) {
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .expect("missing Access-Control-Allow-Origin"),
        "*"
    );
    assert!(
        !headers.contains_key("access-control-allow-credentials"),
        "credentials must never be allowed alongside a wildcard origin"
    );
}
