//! Common utilities for smoke tests against a running deployment.

use smoke_tests::{base_url_from_env, init_tracing, wait_for_service, ApiTester};
use std::time::Duration;

/// Default timeout for waiting on the service.
pub const SERVICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a tester for `API_BASE_URL`, ensuring the service is healthy first.
pub async fn setup() -> ApiTester {
    init_tracing();

    wait_for_service(&base_url_from_env(), SERVICE_TIMEOUT)
        .await
        .expect("Service not healthy - start timetracker-service first");

    ApiTester::from_env().expect("Failed to create API tester")
}
