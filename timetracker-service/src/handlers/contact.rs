use crate::dtos::{ContactMessageResponse, CreateContactMessageRequest};
use crate::models::ContactMessage;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Upper bound on records returned by `GET /api/contact`.
pub const CONTACT_MESSAGE_LIST_LIMIT: usize = 100;

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactMessageRequest,
    responses(
        (status = 200, description = "Contact message stored", body = ContactMessageResponse),
        (status = 422, description = "Missing or empty required field", body = crate::dtos::ErrorDetail),
        (status = 500, description = "Store failure", body = crate::dtos::ErrorDetail)
    ),
    tag = "Contact"
)]
pub async fn submit_contact_form(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateContactMessageRequest>,
) -> Result<Json<ContactMessageResponse>, AppError> {
    let message = ContactMessage::new(req, state.clock.now(), state.ids.as_ref());

    state
        .store
        .insert_contact_message(&message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error submitting contact form");
            metrics::counter!("contact_messages_failed_total").increment(1);
            AppError::OperationFailed("Failed to submit contact form", anyhow::Error::new(e))
        })?;

    metrics::counter!("contact_messages_submitted_total").increment(1);
    tracing::info!(
        contact_message_id = %message.id,
        user_email = %message.user_email,
        "New contact form submission"
    );

    Ok(Json(ContactMessageResponse::from(message)))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Contact messages, newest first", body = [ContactMessageResponse]),
        (status = 500, description = "Store failure", body = crate::dtos::ErrorDetail)
    ),
    tag = "Contact"
)]
pub async fn list_contact_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessageResponse>>, AppError> {
    let messages = state
        .store
        .list_contact_messages(CONTACT_MESSAGE_LIST_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching contact messages");
            AppError::DatabaseError(anyhow::Error::new(e))
        })?;

    Ok(Json(
        messages
            .into_iter()
            .map(ContactMessageResponse::from)
            .collect(),
    ))
}
