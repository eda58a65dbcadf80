//! HTTP smoke tests for a running TimeTracker Pro API.
//!
//! Exercises every public route over the network and checks that the CORS
//! headers a browser depends on are present and consistent.
//!
//! ## Usage
//!
//! ```bash
//! API_BASE_URL=http://localhost:8001 cargo run -p smoke-tests
//! API_BASE_URL=http://localhost:8001 cargo test -p smoke-tests -- --ignored
//! ```

use anyhow::{anyhow, Result};
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Once;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Origin sent with every request so the deployment answers as it would to a browser.
pub const SMOKE_ORIGIN: &str = "https://smoke.timetracker.example";

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,smoke_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Base URL from `API_BASE_URL`, without a trailing slash.
pub fn base_url_from_env() -> String {
    std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Outcome of a single HTTP check.
#[derive(Debug)]
pub struct CheckResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Validate the CORS headers on a response.
///
/// The origin must be `*` and credentials must not be allowed alongside it.
/// For preflights the allowed methods must include GET, POST and OPTIONS.
pub fn validate_cors_headers(headers: &HeaderMap, preflight: bool) -> Result<()> {
    let origin = header_str(headers, "access-control-allow-origin")
        .ok_or_else(|| anyhow!("Access-Control-Allow-Origin header missing"))?;
    if origin != "*" {
        return Err(anyhow!(
            "Access-Control-Allow-Origin is '{}', expected '*'",
            origin
        ));
    }

    if let Some(credentials) = header_str(headers, "access-control-allow-credentials") {
        return Err(anyhow!(
            "Access-Control-Allow-Credentials is '{}' alongside a wildcard origin",
            credentials
        ));
    }

    if preflight {
        let methods = header_str(headers, "access-control-allow-methods")
            .ok_or_else(|| anyhow!("Access-Control-Allow-Methods header missing"))?
            .to_uppercase();
        for method in ["GET", "POST", "OPTIONS"] {
            if !methods.split(',').any(|m| m.trim() == method) {
                return Err(anyhow!(
                    "Access-Control-Allow-Methods '{}' does not include {}",
                    methods,
                    method
                ));
            }
        }
    }

    Ok(())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Client for a single deployment that counts checks run and passed.
pub struct ApiTester {
    pub base_url: String,
    pub api_url: String,
    client: reqwest::Client,
    tests_run: usize,
    tests_passed: usize,
}

impl ApiTester {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_url: format!("{}/api", base_url),
            base_url,
            client,
            tests_run: 0,
            tests_passed: 0,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(base_url_from_env())
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn tests_passed(&self) -> usize {
        self.tests_passed
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }

    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<CheckResponse> {
        let mut request = self
            .client
            .request(method, url)
            .header("Origin", SMOKE_ORIGIN);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read body from {}: {}", url, e))?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(CheckResponse {
            status,
            headers,
            body,
        })
    }

    /// Run one named check and record whether it passed.
    async fn run_check(
        &mut self,
        name: &str,
        method: Method,
        url: String,
        expected: StatusCode,
        body: Option<Value>,
    ) -> Result<CheckResponse> {
        self.tests_run += 1;
        tracing::info!(check = name, method = %method, url = %url, "Running check");

        let outcome = match self.send(method, &url, body.as_ref()).await {
            Ok(response) if response.status != expected => Err(anyhow!(
                "expected status {}, got {}: {}",
                expected,
                response.status,
                response.body
            )),
            Ok(response) => validate_cors_headers(&response.headers, false).map(|_| response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => {
                self.tests_passed += 1;
                tracing::info!(check = name, status = %response.status, "Passed");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(check = name, error = %e, "Failed");
                Err(anyhow!("{} failed: {}", name, e))
            }
        }
    }

    pub async fn check_root(&mut self) -> Result<CheckResponse> {
        let url = format!("{}/", self.base_url);
        self.run_check("Root", Method::GET, url, StatusCode::OK, None)
            .await
    }

    pub async fn check_api_root(&mut self) -> Result<CheckResponse> {
        let url = format!("{}/", self.api_url);
        let response = self
            .run_check("API Root", Method::GET, url, StatusCode::OK, None)
            .await?;
        expect_field(&response.body, "status", "ok")?;
        Ok(response)
    }

    pub async fn check_health(&mut self) -> Result<CheckResponse> {
        let url = format!("{}/health", self.api_url);
        let response = self
            .run_check("Health Check", Method::GET, url, StatusCode::OK, None)
            .await?;
        expect_field(&response.body, "status", "ok")?;
        if response.body["database"] != "connected" {
            tracing::warn!(database = %response.body["database"], "Database is not connected");
        }
        Ok(response)
    }

    pub async fn submit_contact_form(
        &mut self,
        name: &str,
        email: &str,
        company: Option<&str>,
        phone: Option<&str>,
        message: &str,
    ) -> Result<CheckResponse> {
        let url = format!("{}/contact", self.api_url);
        let body = json!({
            "user_name": name,
            "user_email": email,
            "user_company": company,
            "user_phone": phone,
            "message": message,
        });
        let response = self
            .run_check(
                "Submit Contact Form",
                Method::POST,
                url,
                StatusCode::OK,
                Some(body),
            )
            .await?;
        expect_field(&response.body, "user_email", email)?;
        Ok(response)
    }

    pub async fn list_contact_messages(&mut self) -> Result<CheckResponse> {
        let url = format!("{}/contact", self.api_url);
        let response = self
            .run_check("Get Contact Messages", Method::GET, url, StatusCode::OK, None)
            .await?;
        expect_array(&response.body)?;
        Ok(response)
    }

    pub async fn create_status_check(&mut self, client_name: &str) -> Result<CheckResponse> {
        let url = format!("{}/status", self.api_url);
        let body = json!({ "client_name": client_name });
        let response = self
            .run_check(
                "Create Status Check",
                Method::POST,
                url,
                StatusCode::OK,
                Some(body),
            )
            .await?;
        expect_field(&response.body, "client_name", client_name)?;
        Ok(response)
    }

    pub async fn list_status_checks(&mut self) -> Result<CheckResponse> {
        let url = format!("{}/status", self.api_url);
        let response = self
            .run_check("Get Status Checks", Method::GET, url, StatusCode::OK, None)
            .await?;
        expect_array(&response.body)?;
        Ok(response)
    }

    /// Send a browser-style preflight for `method` to `path` and validate the answer.
    pub async fn check_preflight(&mut self, path: &str, method: &str) -> Result<CheckResponse> {
        let name = format!("Preflight {} {}", method, path);
        let url = format!("{}{}", self.base_url, path);
        self.tests_run += 1;

        let outcome = async {
            let response = self
                .client
                .request(Method::OPTIONS, &url)
                .header("Origin", SMOKE_ORIGIN)
                .header("Access-Control-Request-Method", method)
                .header("Access-Control-Request-Headers", "content-type")
                .send()
                .await
                .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("expected 200 or 204, got {}", status));
            }
            let headers = response.headers().clone();
            validate_cors_headers(&headers, true)?;

            Ok(CheckResponse {
                status,
                headers,
                body: Value::Null,
            })
        }
        .await;

        match outcome {
            Ok(response) => {
                self.tests_passed += 1;
                tracing::info!(check = %name, status = %response.status, "Passed");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(check = %name, error = %e, "Failed");
                Err(anyhow!("{} failed: {}", name, e))
            }
        }
    }
}

fn expect_field(body: &Value, field: &str, expected: &str) -> Result<()> {
    if body[field] == expected {
        Ok(())
    } else {
        Err(anyhow!(
            "expected {} to be '{}', got {}",
            field,
            expected,
            body[field]
        ))
    }
}

fn expect_array(body: &Value) -> Result<()> {
    if body.is_array() {
        Ok(())
    } else {
        Err(anyhow!("expected a JSON array, got {}", body))
    }
}

/// Poll the health endpoint until it answers 200 or the timeout elapses.
pub async fn wait_for_service(base_url: &str, timeout: Duration) -> Result<()> {
    let url = format!("{}/api/health", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();
    let start = std::time::Instant::now();

    tracing::info!(url = %url, "Waiting for service to be healthy...");

    loop {
        let last_error = match client.get(&url).timeout(Duration::from_secs(2)).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!("Service is healthy");
                return Ok(());
            }
            Ok(resp) => format!("status: {}", resp.status()),
            Err(e) => format!("error: {}", e),
        };

        if start.elapsed() > timeout {
            return Err(anyhow!(
                "Timeout waiting for service at {} ({})",
                url,
                last_error
            ));
        }

        tracing::debug!("Service not ready: {}", last_error);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
