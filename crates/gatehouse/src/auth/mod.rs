//! Authentication core for Gatehouse.
//!
//! This module turns opaque bearer tokens into resolved identities by
//! consulting the configured OIDC provider and caching the result.
//!
//! # Components
//!
//! - `claims` - Claim construction and the `Identity` value type
//! - `cache` - Time-bounded claims cache keyed by namespaced token
//! - `resolver` - The per-request authentication state machine

pub mod cache;
pub mod claims;
pub mod resolver;

pub use cache::{ClaimsCache, MemoryClaimsCache};
pub use claims::{ClaimEntry, Identity};
pub use resolver::{AuthOutcome, AuthResolver};
