use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// JSON body that has been deserialized and validated before the handler runs.
///
/// Missing or mistyped fields surface as the extractor's own 4xx; failed
/// `validator` rules become a 422. Either way the store is never touched.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::InvalidBody(e)
        })?;

        value.validate().map_err(|e| {
            tracing::debug!(error = %e, "Request body failed validation");
            AppError::ValidationError(e)
        })?;

        Ok(ValidatedJson(value))
    }
}
