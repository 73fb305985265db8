//! Request handlers for the prediction service.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::MAX_BODY_BYTES;
use crate::error::{Result, ServerError};
use crate::state::AppState;
use neo_validation::{Record, ValidationError, dataframe_to_records, records_to_dataframe};

/// Trusted payload: rows that were already validated upstream.
#[derive(Debug, Deserialize)]
struct PassthroughRequest {
    #[serde(rename = "processedData")]
    processed_data: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<u8>,
    /// The cleaned table, echoed back so callers can see what was
    /// actually scored. Omitted on the trusted passthrough path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// POST /predict
///
/// Accepts three request shapes, dispatched on Content-Type:
///
/// - `application/json` with `{"processedData": [...]}`: trusted rows,
///   scored without validation; any failure here is a 500
/// - `multipart/form-data` with a `file` field holding a CSV: runs the
///   full validation pipeline; validation failures are 400
/// - anything else: the body itself is CSV text, same as multipart
pub async fn predict(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<PredictResponse>> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("application/json") {
        predict_passthrough(state, req).await
    } else if content_type.starts_with("multipart/form-data") {
        predict_multipart(state, req).await
    } else {
        predict_raw_csv(state, req).await
    }
}

/// Score rows the caller has already validated. No pipeline, no `data`
/// echo, and every failure is the server's fault.
async fn predict_passthrough(state: AppState, req: Request) -> Result<Json<PredictResponse>> {
    let bytes = read_body(req)
        .await
        .map_err(|e| ServerError::Passthrough(e.to_string()))?;
    let request: PassthroughRequest = serde_json::from_slice(&bytes)
        .map_err(|e| ServerError::Passthrough(format!("invalid JSON body: {}", e)))?;

    let df = records_to_dataframe(&request.processed_data)
        .map_err(|e| ServerError::Passthrough(e.to_string()))?;
    ensure_features(&df, &state).map_err(|e| ServerError::Passthrough(e.to_string()))?;

    let predictions = state.classifier.predict(&df)?;
    tracing::info!("scored {} trusted row(s)", df.height());

    Ok(Json(PredictResponse {
        predictions,
        data: None,
    }))
}

/// Pull the CSV out of a multipart upload's `file` field and validate it.
async fn predict_multipart(state: AppState, req: Request) -> Result<Json<PredictResponse>> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| validation_err(format!("invalid multipart request: {}", e)))?;

    let mut csv: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation_err(format!("failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| validation_err(format!("failed to read uploaded file: {}", e)))?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| validation_err("uploaded file is not valid UTF-8".to_string()))?;
        csv = Some(text);
        break;
    }

    let csv = csv.ok_or_else(|| validation_err("multipart upload has no 'file' field".to_string()))?;
    validate_and_predict(state, &csv).await
}

/// Treat the request body itself as CSV text and validate it.
async fn predict_raw_csv(state: AppState, req: Request) -> Result<Json<PredictResponse>> {
    let bytes = read_body(req).await?;
    let csv = String::from_utf8(bytes.to_vec())
        .map_err(|_| validation_err("request body is not valid UTF-8".to_string()))?;
    validate_and_predict(state, &csv).await
}

/// The shared CSV path: full pipeline, then score, then echo the
/// cleaned table back.
async fn validate_and_predict(state: AppState, csv: &str) -> Result<Json<PredictResponse>> {
    let outcome = state.pipeline.validate_csv(csv)?;
    ensure_features(&outcome.data, &state)?;

    let predictions = state.classifier.predict(&outcome.data)?;
    let data = dataframe_to_records(&outcome.data)?;
    tracing::info!(
        "scored {} validated row(s), {} healing action(s)",
        outcome.data.height(),
        outcome.report.actions.len()
    );

    Ok(Json(PredictResponse {
        predictions,
        data: Some(data),
    }))
}

/// Last line of defence before the classifier: every feature column the
/// pipeline schema names must be present.
fn ensure_features(df: &DataFrame, state: &AppState) -> Result<()> {
    for name in state.pipeline.schema().feature_names() {
        if df.column(name).is_err() {
            return Err(ServerError::Validation(ValidationError::FeatureMissing(
                name.to_string(),
            )));
        }
    }
    Ok(())
}

async fn read_body(req: Request) -> Result<axum::body::Bytes> {
    axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| validation_err(format!("failed to read request body: {}", e)))
}

fn validation_err(message: String) -> ServerError {
    ServerError::Validation(ValidationError::MalformedInput(message))
}
