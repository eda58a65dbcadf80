use service_core::observability::init_tracing;
use timetracker_service::config::TimeTrackerConfig;
use timetracker_service::services::init_metrics;
use timetracker_service::startup::Application;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = TimeTrackerConfig::load()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        store = ?config.store.backend,
        database = %config.store.database,
        "TimeTracker Pro API is starting up..."
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
