use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// Health check endpoint
///
/// GET /health
///
/// Liveness only; the store is not touched.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Customers service is healthy.",
    })
}
