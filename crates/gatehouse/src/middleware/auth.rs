//! Authentication middleware for protected routes.
//!
//! Runs the resolver against the incoming request. On success the resolved
//! identity is stored in request extensions for handlers; otherwise the
//! request ends with the 401 challenge body.

use crate::auth::claims::Identity;
use crate::auth::resolver::{AuthOutcome, AuthResolver};
use crate::errors::GateError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Resolver shared across requests; the claims cache lives inside it.
    pub resolver: Arc<AuthResolver>,
}

/// Authentication middleware that resolves bearer tokens.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// - Returns 401 with the fixed challenge body when no credential resolves
///   (no other authentication mechanisms are registered, so "no result"
///   ends the pipeline here)
/// - Continues to the next handler with `Identity` in extensions otherwise
#[instrument(skip_all, name = "gate.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, GateError> {
    match state.resolver.authenticate(req.headers()).await {
        AuthOutcome::Success(identity) => {
            // Store the identity in request extensions for downstream handlers
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        AuthOutcome::NoResult => Err(GateError::Unauthorized),
    }
}

/// Extension trait for extracting the identity from a request.
///
/// Provides a convenient method for handlers to get the authenticated
/// identity.
#[allow(dead_code)] // API for handlers that need the identity from a request
pub trait IdentityExt {
    /// Get the authenticated identity from request extensions.
    ///
    /// Returns `None` if auth middleware was not applied to this request.
    fn identity(&self) -> Option<&Identity>;
}

#[allow(dead_code)] // Implementation for IdentityExt trait
impl<B> IdentityExt for axum::extract::Request<B> {
    fn identity(&self) -> Option<&Identity> {
        self.extensions().get::<Identity>()
    }
}
