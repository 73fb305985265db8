//! HTTP prediction service for NEO hazard classification.
//!
//! Exposes a single `POST /predict` endpoint backed by the
//! `neo-validation` pipeline and a JSON-serialized random forest. CSV
//! submissions (raw body or multipart upload) run through the full
//! validation pipeline; JSON `processedData` payloads are trusted and
//! scored directly.

pub mod classifier;
pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub use classifier::{Classifier, ForestClassifier, ModelError};
pub use error::ServerError;
pub use state::AppState;

/// Upper bound on request bodies, shared by all request shapes.
pub(crate) const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // axum's built-in 2 MB cap is too small for real NEO exports;
        // the request-body layer enforces the actual limit.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
}
