use axum::Json;
use serde_json::{json, Value};
use tracing::instrument;

/// 健康检查
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is healthy"))
)]
#[instrument]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "web-service"
    }))
}
