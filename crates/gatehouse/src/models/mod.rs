//! Gatehouse models.
//!
//! Wire models for the OIDC provider API plus shared response bodies.
//! Provider responses carry subject and profile data, so their Debug
//! impls redact identifying fields to keep them out of logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token introspection response from `POST {base}/token/introspection`.
///
/// For an inactive token the provider typically sends only
/// `{"active": false}`; every other field defaults so the body still
/// parses.
#[derive(Clone, Deserialize)]
pub struct IntrospectionResponse {
    /// Whether the token is currently valid.
    pub active: bool,

    /// Subject (user id) the token was issued to - redacted in Debug output.
    #[serde(default)]
    pub sub: String,

    /// Client the token was issued through.
    #[serde(default)]
    pub client_id: String,

    /// Expiration timestamp (Unix epoch seconds).
    #[serde(default)]
    pub exp: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    #[serde(default)]
    pub iat: i64,

    /// Space-separated scopes granted to this token.
    #[serde(default)]
    pub scope: String,
}

impl IntrospectionResponse {
    /// Scopes as an ordered list, empty entries removed.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope.split_whitespace().collect()
    }

    /// Token expiry as a UTC timestamp.
    ///
    /// An out-of-range `exp` collapses to the epoch, which downstream
    /// expiry math treats as already expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Custom Debug implementation that redacts the `sub` field.
impl fmt::Debug for IntrospectionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntrospectionResponse")
            .field("active", &self.active)
            .field("sub", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("scope", &self.scope)
            .finish()
    }
}

/// User profile response from `GET {base}/me`.
///
/// Everything except `sub` is optional; absent fields become empty-string
/// claim values downstream.
#[derive(Clone, Deserialize)]
pub struct ProfileResponse {
    /// Subject (user id) - redacted in Debug output.
    #[serde(default)]
    pub sub: String,

    /// Email address - redacted in Debug output.
    #[serde(default)]
    pub email: Option<String>,

    /// Display name - redacted in Debug output.
    #[serde(default)]
    pub name: Option<String>,

    /// Company, when the provider directory has one.
    #[serde(default)]
    pub company: Option<String>,

    /// Department, when the provider directory has one.
    #[serde(default)]
    pub department: Option<String>,

    /// Provider group memberships.
    #[serde(default)]
    pub groups: Option<Vec<String>>,
}

/// Custom Debug implementation that redacts identifying fields but keeps
/// their presence visible.
impl fmt::Debug for ProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileResponse")
            .field("sub", &"[REDACTED]")
            .field("email", &self.email.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name.as_ref().map(|_| "[REDACTED]"))
            .field("company", &self.company)
            .field("department", &self.department)
            .field("groups", &self.groups)
            .finish()
    }
}

/// Fixed error body returned by every non-success response.
///
/// The field is serialized as `statusCode`; consumers parse that exact
/// name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Status code as carried in the body (may differ from the HTTP
    /// status for the forbidden response; see `errors`).
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Human-readable message.
    pub message: String,
}

/// Health check response.
///
/// Returned by the `/v1/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status ("healthy").
    pub status: String,
}
