pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TimeTracker Pro API",
        description = "API for TimeTracker Pro - Time Management System"
    ),
    paths(
        handlers::root::api_root,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::status::create_status_check,
        handlers::status::list_status_checks,
        handlers::contact::submit_contact_form,
        handlers::contact::list_contact_messages,
    ),
    components(
        schemas(
            dtos::ApiInfoResponse,
            dtos::HealthResponse,
            dtos::ErrorDetail,
            dtos::CreateStatusCheckRequest,
            dtos::StatusCheckResponse,
            dtos::CreateContactMessageRequest,
            dtos::ContactMessageResponse,
        )
    ),
    tags(
        (name = "Status", description = "Client status checks"),
        (name = "Contact", description = "Contact form submissions"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
