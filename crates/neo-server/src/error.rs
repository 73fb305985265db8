//! Error types for the prediction service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::ModelError;
use neo_validation::ValidationError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Request-handling errors.
///
/// Validation failures are the caller's fault and map to 400. Errors on
/// the trusted passthrough path, model errors, and everything else are
/// server-side and map to 500.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The submitted CSV failed input validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The trusted pre-processed payload could not be used.
    #[error("Failed to process trusted payload: {0}")]
    Passthrough(String),

    /// The classifier could not score the validated table.
    #[error("Prediction failed: {0}")]
    Model(#[from] ModelError),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Validation(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
