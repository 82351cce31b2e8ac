//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate with
//! Gatehouse-specific guidance. Use these types for all sensitive values:
//! the OIDC client secret, credentials loaded from the environment, and
//! any future API keys.
//!
//! # Compile-Time Safety
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so
//! any struct that derives `Debug` while holding a secret gets safe logging
//! behavior for free. Reaching the actual value requires an explicit
//! `expose_secret()` call, which keeps every use grep-able.
//!
//! # Memory Safety
//!
//! Secrets are zeroized when dropped, so credential material does not
//! linger in freed memory.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct ProviderCredentials {
//!     client_id: String,
//!     client_secret: SecretString, // Debug shows "[REDACTED]"
//! }
//!
//! let creds = ProviderCredentials {
//!     client_id: "svc-gatehouse".to_string(),
//!     client_secret: SecretString::from("hunter2"),
//! };
//!
//! // Safe: client_secret is redacted
//! println!("{:?}", creds);
//!
//! // Explicit access only
//! let secret: &str = creds.client_secret.expose_secret();
//! # let _ = secret;
//! ```
//!
//! # Gatehouse Usage Guidelines
//!
//! Use `SecretString` for:
//! - The OIDC `client_secret` sent with introspection calls
//! - Any credential loaded from the environment
//!
//! Use `SecretBox<T>` for custom secret types (e.g. binary key material),
//! should any appear.

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};
