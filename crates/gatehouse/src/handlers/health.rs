//! Health check handler.

use crate::models::HealthResponse;
use axum::Json;
use tracing::instrument;

/// Health check handler.
///
/// The service holds no local state worth probing (the claims cache is a
/// best-effort optimization), so liveness is the whole story.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy"
/// }
/// ```
#[instrument(skip_all, name = "gate.handlers.health")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
