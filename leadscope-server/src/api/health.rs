//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring.

use axum::Json;

/// GET /api/health
/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
