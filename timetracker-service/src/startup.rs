//! Router assembly and server lifecycle.

use crate::config::{StoreBackend, TimeTrackerConfig};
use crate::handlers;
use crate::services::{
    Clock, IdGenerator, MemoryStore, MongoStore, Store, SystemClock, UuidGenerator,
};
use crate::ApiDoc;
use axum::{
    middleware::from_fn,
    routing::{get, MethodRouter},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Shared application state. Cloned per request; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: TimeTrackerConfig,
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(config: TimeTrackerConfig, store: Arc<dyn Store>) -> Self {
        Self {
            config,
            store,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }
}

fn with_405(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::method_not_allowed)
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = state.config.cors.clone();

    let app = Router::new()
        .route("/", with_405(get(handlers::root)))
        .route("/api", with_405(get(handlers::api_root)))
        .route("/api/", with_405(get(handlers::api_root)))
        .route("/api/health", with_405(get(handlers::health_check)))
        .route("/api/ready", with_405(get(handlers::readiness_check)))
        .route(
            "/api/status",
            with_405(get(handlers::list_status_checks).post(handlers::create_status_check)),
        )
        .route(
            "/api/contact",
            with_405(get(handlers::list_contact_messages).post(handlers::submit_contact_form)),
        )
        .route("/metrics", with_405(get(handlers::metrics::metrics)))
        .route(
            handlers::root::DOCS_PATH,
            with_405(get(|| async { Json(ApiDoc::openapi()) })),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware));

    // Outermost: preflights never reach routing, every response gets CORS headers.
    cors.apply(app)
}

pub async fn connect_store(config: &TimeTrackerConfig) -> Result<Arc<dyn Store>, AppError> {
    match config.store.backend {
        StoreBackend::MongoDb => {
            let db = MongoStore::connect(&config.store.uri, &config.store.database).await?;
            // The driver connects lazily; an unreachable server must not keep
            // the service down, /api/health reports it instead.
            if let Err(e) = db.initialize_indexes().await {
                tracing::warn!(error = %e, "Index initialization failed, continuing");
            }
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub struct Application {
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: TimeTrackerConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Build around an already constructed store (port 0 picks a random port).
    pub async fn build_with_store(
        config: TimeTrackerConfig,
        store: Arc<dyn Store>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::new(config, store);
        let router = build_router(state.clone())?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Listening");

        Ok(Self {
            listener,
            router,
            state,
        })
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let store = self.state.store.clone();

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("TimeTracker Pro API is shutting down...");
        store.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
