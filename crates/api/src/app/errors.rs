use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use genobench_inference::ProcessorError;

/// Map processor failures onto the API's error shape.
///
/// Only the two not-found conditions are client errors; everything the
/// orchestrator throws at us is an upstream failure and stays 5xx.
pub fn processor_error_to_response(err: ProcessorError) -> axum::response::Response {
    match err {
        ProcessorError::ResultsNotReady | ProcessorError::ResultsMissing => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        ProcessorError::Orchestrator(e) => {
            tracing::error!("orchestrator call failed: {e}");
            json_error(StatusCode::BAD_GATEWAY, "orchestrator_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
