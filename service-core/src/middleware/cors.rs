//! Cross-origin request policy.
//!
//! The policy is turned into a `tower_http` [`CorsLayer`] which answers
//! preflight `OPTIONS` requests itself and stamps `Access-Control-Allow-Origin`
//! on every other response, errors included. [`CorsPolicy::apply`] installs it
//! as the outermost layer so that unmatched routes are covered too.
//!
//! `CorsLayer` short-circuits every `OPTIONS` request. Only those carrying
//! `Access-Control-Request-Method` are preflights; the rest are sent past the
//! layer to the router and get their allow-origin header stamped here.

use crate::error::AppError;
use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::{Next, from_fn_with_state},
    response::Response,
};
use std::time::Duration;
use tower::util::ServiceExt;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

pub const WILDCARD_ORIGIN: &str = "*";

/// Methods accepted from cross-origin callers unless configured otherwise.
pub const DEFAULT_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Allowed origins. A single `*` entry accepts any origin.
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<Method>,
    /// Never combinable with a wildcard origin.
    pub allow_credentials: bool,
    pub max_age: Duration,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec![WILDCARD_ORIGIN.to_string()],
            allowed_methods: DEFAULT_METHODS.to_vec(),
            allow_credentials: false,
            max_age: Duration::from_secs(600),
        }
    }
}

impl CorsPolicy {
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == WILDCARD_ORIGIN)
    }

    /// Parse a list of method names such as `["GET", "POST"]`.
    pub fn parse_methods(names: &[String]) -> Result<Vec<Method>, AppError> {
        names
            .iter()
            .map(|name| {
                Method::from_bytes(name.to_uppercase().as_bytes()).map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid CORS method '{}': {}", name, e))
                })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.allowed_origins.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "At least one CORS origin must be configured"
            )));
        }

        if self.allowed_methods.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "At least one CORS method must be configured"
            )));
        }

        // Browsers reject `Allow-Origin: *` together with `Allow-Credentials: true`.
        if self.is_wildcard() && self.allow_credentials {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Wildcard CORS origin cannot be combined with credentialed requests"
            )));
        }

        Ok(())
    }

    /// `Access-Control-Allow-Origin` value for a request from `origin`, if allowed.
    pub fn allow_origin_for(&self, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
        if self.is_wildcard() {
            return Some(HeaderValue::from_static(WILDCARD_ORIGIN));
        }

        origin
            .filter(|o| {
                self.allowed_origins
                    .iter()
                    .any(|allowed| allowed.as_bytes() == o.as_bytes())
            })
            .cloned()
    }

    /// Wrap `router` in the CORS layer plus the plain-`OPTIONS` bypass.
    pub fn apply(&self, router: Router) -> Result<Router, AppError> {
        let cors = self.layer()?;
        let bypass = PlainOptions {
            router: router.clone(),
            policy: self.clone(),
        };

        Ok(router
            .layer(cors)
            .layer(from_fn_with_state(bypass, plain_options_middleware)))
    }

    pub fn layer(&self) -> Result<CorsLayer, AppError> {
        self.validate()?;

        let layer = CorsLayer::new()
            .allow_methods(self.allowed_methods.clone())
            .max_age(self.max_age);

        if self.is_wildcard() {
            return Ok(layer.allow_origin(Any).allow_headers(Any));
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>().map_err(|e| {
                    tracing::error!("Invalid CORS origin '{}': {}", o, e);
                    AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
                })
            })
            .collect::<Result<Vec<HeaderValue>, AppError>>()?;

        let layer = layer.allow_origin(origins);

        if self.allow_credentials {
            Ok(layer
                .allow_credentials(true)
                .allow_headers(AllowHeaders::mirror_request()))
        } else {
            Ok(layer.allow_headers(Any))
        }
    }
}

#[derive(Clone)]
struct PlainOptions {
    router: Router,
    policy: CorsPolicy,
}

fn is_preflight(req: &Request) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

async fn plain_options_middleware(
    State(bypass): State<PlainOptions>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::OPTIONS || is_preflight(&req) {
        return next.run(req).await;
    }

    let origin = req.headers().get(header::ORIGIN).cloned();
    let mut response = match bypass.router.oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if let Some(value) = bypass.policy.allow_origin_for(origin.as_ref()) {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        if !bypass.policy.is_wildcard() {
            headers.append(header::VARY, HeaderValue::from_static("origin"));
            if bypass.policy.allow_credentials {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                );
            }
        }
    }

    response
}
