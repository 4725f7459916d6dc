// crates/backend-lib/src/handlers/mod.rs

//! HTTP handlers.

pub mod auth;
pub mod profile;

use authgate_common::HealthResponse;
use axum::Json;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
