use axum::Json;

use crate::models::order::HealthResponse;

/// Handler for GET /health — static liveness payload.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
