//! Gatehouse Service Library
//!
//! This library provides the core functionality for Gatehouse, an
//! authenticating API gateway that validates opaque bearer tokens against
//! a remote OAuth2/OIDC provider:
//!
//! - Bearer-token extraction and resolution (cache hit, or introspection
//!   plus best-effort profile lookup on a miss)
//! - Time-bounded claims caching (fixed ceiling, never past the token's
//!   own expiry)
//! - Structured JSON error responses with fixed bodies (401/403/500)
//!
//! # Architecture
//!
//! Request flow:
//!
//! ```text
//! routes/mod.rs -> middleware/auth.rs -> auth/resolver.rs
//!                                          -> auth/cache.rs      (hit)
//!                                          -> services/oidc.rs   (miss)
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with fixed JSON response bodies
//! - `models` - Provider wire models and shared response bodies
//! - `auth` - Claims, claims cache, and the authentication resolver
//! - `services` - OIDC provider HTTP client
//! - `middleware` - Route-guarding middleware
//! - `handlers` - HTTP request handlers
//! - `routes` - Axum router setup

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
