//! Service layer for Gatehouse.
//!
//! This module contains services that interact with external systems.
//!
//! # Components
//!
//! - `oidc` - HTTP client for the OIDC provider (introspection + profile)

pub mod oidc;

pub use oidc::{IdentityApi, OidcClient};
