use axum::Json;

/// Liveness probe.
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
