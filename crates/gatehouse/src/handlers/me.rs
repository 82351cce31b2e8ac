//! Current user handler.
//!
//! Returns information about the authenticated caller from the resolved
//! claim set.

use crate::auth::claims::Identity;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::instrument;

/// Response for `/v1/me` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    /// Subject (user id).
    pub sub: String,

    /// Display name; empty when the provider profile had none.
    pub name: String,

    /// Email; empty when the provider profile had none.
    pub email: String,

    /// Token scopes.
    pub scopes: Vec<String>,

    /// Provider groups (double as authorization roles).
    pub groups: Vec<String>,
}

/// Handler for GET /v1/me
///
/// Returns the authenticated caller's resolved identity. Requires valid
/// authentication via the auth middleware.
///
/// ## Response
///
/// Returns 200 OK with the caller's identity:
///
/// ```json
/// {
///   "sub": "u1",
///   "name": "Alice",
///   "email": "alice@example.com",
///   "scopes": ["read"],
///   "groups": ["admins"]
/// }
/// ```
#[instrument(skip_all, name = "gate.handlers.me")]
pub async fn get_me(Extension(identity): Extension<Identity>) -> Json<MeResponse> {
    tracing::debug!(target: "gate.handlers.me", "Returning caller identity");

    Json(MeResponse {
        sub: identity.user_id().unwrap_or_default().to_string(),
        name: identity.display_name().to_string(),
        email: identity.email().to_string(),
        scopes: identity.scopes().iter().map(|s| (*s).to_string()).collect(),
        groups: identity.groups().iter().map(|g| (*g).to_string()).collect(),
    })
}
