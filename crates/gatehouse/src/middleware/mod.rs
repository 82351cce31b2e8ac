//! Middleware for Gatehouse.
//!
//! This module contains HTTP middleware layers for the service.
//!
//! # Components
//!
//! - `auth` - Authentication middleware for protected routes

pub mod auth;

pub use auth::{require_auth, AuthState};
