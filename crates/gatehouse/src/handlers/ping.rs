//! Ping handlers.
//!
//! `ping` is open and exists so consumers can verify reachability without
//! a token. `protected_ping` echoes the authenticated caller's display
//! name, which smoke-tests the whole auth path. `admin_ping` additionally
//! requires membership in the admin group.

use crate::auth::claims::Identity;
use crate::errors::GateError;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::instrument;

/// Provider group that gates the admin route. Groups double as
/// authorization roles.
const ADMIN_GROUP: &str = "admins";

/// Response for the ping endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PongResponse {
    /// "pong", optionally followed by the caller's display name.
    pub message: String,
}

/// Handler for GET /v1/ping
///
/// Open endpoint; no authentication required.
#[instrument(skip_all, name = "gate.handlers.ping")]
pub async fn ping() -> Json<PongResponse> {
    Json(PongResponse {
        message: "pong".to_string(),
    })
}

/// Handler for GET /v1/protected-ping
///
/// Returns pong and the authenticated caller's display name.
#[instrument(skip_all, name = "gate.handlers.protected_ping")]
pub async fn protected_ping(Extension(identity): Extension<Identity>) -> Json<PongResponse> {
    Json(PongResponse {
        message: format!("pong {}", identity.display_name()),
    })
}

/// Handler for GET /v1/admin/ping
///
/// Like `protected_ping`, but only for members of the admin group.
///
/// ## Response
///
/// - Returns 403 with the fixed forbidden body for non-members
#[instrument(skip_all, name = "gate.handlers.admin_ping")]
pub async fn admin_ping(
    Extension(identity): Extension<Identity>,
) -> Result<Json<PongResponse>, GateError> {
    if !identity.has_group(ADMIN_GROUP) {
        tracing::debug!(target: "gate.handlers.admin_ping", "Caller is not in the admin group");
        return Err(GateError::Forbidden);
    }

    Ok(Json(PongResponse {
        message: format!("pong {}", identity.display_name()),
    }))
}
