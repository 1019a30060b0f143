//! Health check handlers and response types.
//!
//! Neither check contacts the SMTP relay: a relay outage fails uploads, not the process.

use axum::{http::StatusCode, response::IntoResponse, Json};

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check - service identity and version.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            service: "snaprelay",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Liveness check - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}
