//! HTTP routes for Gatehouse.
//!
//! Defines the Axum router: open routes, resolver-gated routes, and the
//! outermost layers (tracing, timeout, panic boundary).

use crate::errors::GateError;
use crate::handlers;
use crate::middleware::auth::{require_auth, AuthState};
use axum::response::IntoResponse;
use axum::{middleware, routing::get, Router};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/v1/health`, `/v1/ping` - open endpoints
/// - `/v1/me`, `/v1/claims`, `/v1/protected-ping`, `/v1/admin/ping`,
///   `/v1/check-message` - gated by the auth middleware
/// - TraceLayer for request logging
/// - 30 second request timeout
/// - CatchPanicLayer converting downstream panics into the fixed 500 body
pub fn build_routes(auth_state: Arc<AuthState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/ping", get(handlers::ping));

    // Protected routes: every request passes through the resolver first
    let protected_routes = Router::new()
        .route("/v1/me", get(handlers::get_me))
        .route("/v1/claims", get(handlers::show_claims))
        .route("/v1/protected-ping", get(handlers::protected_ping))
        .route("/v1/admin/ping", get(handlers::admin_ping))
        .route("/v1/check-message", get(handlers::check_message))
        .layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Apply global middleware layers
    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. CatchPanicLayer - Outermost exception boundary
    public_routes
        .merge(protected_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Outermost exception boundary.
///
/// Logs the panic server-side and answers with the generic 500 body, so
/// clients never see a framework default error page.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(
        target: "gate.routes",
        panic = %detail,
        "Unhandled panic caught at router boundary"
    );

    GateError::Internal.into_response()
}
