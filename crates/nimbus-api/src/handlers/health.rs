//! Liveness endpoint.

use axum::Json;

use crate::dto::response::success;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    success(serde_json::json!({ "status": "ok" }))
}
