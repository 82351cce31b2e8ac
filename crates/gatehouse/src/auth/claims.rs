//! Claim construction and the `Identity` value type.
//!
//! A resolved token is represented as one immutable, ordered list of
//! `(type, value)` claim pairs. The same list is the cache payload and the
//! request identity, so there is exactly one shape to reason about at
//! every boundary.

use crate::models::{IntrospectionResponse, ProfileResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Claim types emitted for an authenticated token.
pub mod claim_types {
    /// Client the token was issued through.
    pub const CLIENT_ID: &str = "CLIENT_ID";

    /// One claim per scope granted to the token.
    pub const CLIENT_SCOPE: &str = "CLIENT_SCOPE";

    /// Subject (user id) from introspection.
    pub const USER_ID: &str = "USER_ID";

    /// Display name from the user profile.
    pub const USER_NAME: &str = "USER_NAME";

    /// Email from the user profile.
    pub const USER_EMAIL: &str = "USER_EMAIL";

    /// Company from the user profile.
    pub const USER_COMPANY: &str = "USER_COMPANY";

    /// Department from the user profile.
    pub const USER_DEPARTMENT: &str = "USER_DEPARTMENT";

    /// One claim per provider group. Groups double as authorization
    /// roles, so group membership drives role checks unmodified.
    pub const USER_GROUP: &str = "USER_GROUP";
}

/// A single typed fact about an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEntry {
    /// Claim type, one of the `claim_types` constants.
    #[serde(rename = "type")]
    pub claim_type: String,

    /// Claim value; empty string when the source field was absent.
    pub value: String,
}

impl ClaimEntry {
    /// Create a claim entry.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Build the canonical claim list for an active token.
///
/// The order is deterministic: `CLIENT_ID`, one `CLIENT_SCOPE` per scope,
/// `USER_ID`, then `USER_NAME`/`USER_EMAIL`/`USER_COMPANY`/
/// `USER_DEPARTMENT` (empty string when the profile or its field is
/// absent), then one `USER_GROUP` per group. Profile absence never removes
/// a claim, it only blanks its value, so the claim set always has the same
/// shape for a given scope/group count.
pub fn build_claims(
    introspection: &IntrospectionResponse,
    profile: Option<&ProfileResponse>,
) -> Vec<ClaimEntry> {
    let mut claims = Vec::new();

    claims.push(ClaimEntry::new(
        claim_types::CLIENT_ID,
        introspection.client_id.clone(),
    ));
    for scope in introspection.scopes() {
        claims.push(ClaimEntry::new(claim_types::CLIENT_SCOPE, scope));
    }

    claims.push(ClaimEntry::new(
        claim_types::USER_ID,
        introspection.sub.clone(),
    ));

    let profile_field = |field: Option<&String>| field.cloned().unwrap_or_default();
    claims.push(ClaimEntry::new(
        claim_types::USER_NAME,
        profile_field(profile.and_then(|p| p.name.as_ref())),
    ));
    claims.push(ClaimEntry::new(
        claim_types::USER_EMAIL,
        profile_field(profile.and_then(|p| p.email.as_ref())),
    ));
    claims.push(ClaimEntry::new(
        claim_types::USER_COMPANY,
        profile_field(profile.and_then(|p| p.company.as_ref())),
    ));
    claims.push(ClaimEntry::new(
        claim_types::USER_DEPARTMENT,
        profile_field(profile.and_then(|p| p.department.as_ref())),
    ));

    if let Some(groups) = profile.and_then(|p| p.groups.as_ref()) {
        for group in groups {
            claims.push(ClaimEntry::new(claim_types::USER_GROUP, group.clone()));
        }
    }

    claims
}

/// An authenticated caller.
///
/// Wraps the ordered claim list in an `Arc` so cache hits, request
/// extensions, and handlers all share one allocation. Cloning is cheap.
#[derive(Clone)]
pub struct Identity {
    claims: Arc<[ClaimEntry]>,
}

impl Identity {
    /// Create an identity from an ordered claim list.
    pub fn new(claims: Vec<ClaimEntry>) -> Self {
        Self {
            claims: claims.into(),
        }
    }

    /// The ordered claim list.
    pub fn claims(&self) -> &[ClaimEntry] {
        &self.claims
    }

    /// Whether the identity carries no claims at all.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn first_value(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    fn all_values(&self, claim_type: &str) -> Vec<&str> {
        self.claims
            .iter()
            .filter(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
            .collect()
    }

    /// Subject (user id) the token was issued to.
    pub fn user_id(&self) -> Option<&str> {
        self.first_value(claim_types::USER_ID)
    }

    /// Client the token was issued through.
    pub fn client_id(&self) -> Option<&str> {
        self.first_value(claim_types::CLIENT_ID)
    }

    /// Display name for the caller (the `USER_NAME` claim; empty when the
    /// profile had none).
    pub fn display_name(&self) -> &str {
        self.first_value(claim_types::USER_NAME).unwrap_or_default()
    }

    /// Email for the caller (empty when the profile had none).
    pub fn email(&self) -> &str {
        self.first_value(claim_types::USER_EMAIL)
            .unwrap_or_default()
    }

    /// Scopes granted to the token, in claim order.
    pub fn scopes(&self) -> Vec<&str> {
        self.all_values(claim_types::CLIENT_SCOPE)
    }

    /// Provider groups, in claim order. These double as authorization
    /// roles.
    pub fn groups(&self) -> Vec<&str> {
        self.all_values(claim_types::USER_GROUP)
    }

    /// Check membership in a provider group (i.e. a role check).
    pub fn has_group(&self, group: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_types::USER_GROUP && c.value == group)
    }
}

/// Custom Debug implementation that keeps claim values (subject, email,
/// name) out of logs.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("claims", &self.claims.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn introspection(sub: &str, client_id: &str, scope: &str) -> IntrospectionResponse {
        serde_json::from_value(serde_json::json!({
            "active": true,
            "sub": sub,
            "client_id": client_id,
            "exp": 1700003600,
            "iat": 1700000000,
            "scope": scope
        }))
        .unwrap()
    }

    fn profile(json: serde_json::Value) -> ProfileResponse {
        serde_json::from_value(json).unwrap()
    }

    fn pairs(claims: &[ClaimEntry]) -> Vec<(&str, &str)> {
        claims
            .iter()
            .map(|c| (c.claim_type.as_str(), c.value.as_str()))
            .collect()
    }

    #[test]
    fn test_build_claims_full_deterministic_order() {
        let intro = introspection("u1", "c1", "read write");
        let prof = profile(serde_json::json!({
            "sub": "u1",
            "email": "alice@example.com",
            "name": "Alice",
            "company": "Acme",
            "department": "Engineering",
            "groups": ["admins", "staff"]
        }));

        let claims = build_claims(&intro, Some(&prof));

        assert_eq!(
            pairs(&claims),
            vec![
                ("CLIENT_ID", "c1"),
                ("CLIENT_SCOPE", "read"),
                ("CLIENT_SCOPE", "write"),
                ("USER_ID", "u1"),
                ("USER_NAME", "Alice"),
                ("USER_EMAIL", "alice@example.com"),
                ("USER_COMPANY", "Acme"),
                ("USER_DEPARTMENT", "Engineering"),
                ("USER_GROUP", "admins"),
                ("USER_GROUP", "staff"),
            ]
        );
    }

    #[test]
    fn test_build_claims_no_scopes_emits_no_scope_claims() {
        let intro = introspection("u1", "c1", "");

        let claims = build_claims(&intro, None);

        assert!(claims
            .iter()
            .all(|c| c.claim_type != claim_types::CLIENT_SCOPE));
    }

    #[test]
    fn test_build_claims_missing_profile_blanks_values() {
        let intro = introspection("u1", "c1", "read");

        let claims = build_claims(&intro, None);

        assert_eq!(
            pairs(&claims),
            vec![
                ("CLIENT_ID", "c1"),
                ("CLIENT_SCOPE", "read"),
                ("USER_ID", "u1"),
                ("USER_NAME", ""),
                ("USER_EMAIL", ""),
                ("USER_COMPANY", ""),
                ("USER_DEPARTMENT", ""),
            ]
        );
    }

    #[test]
    fn test_build_claims_partial_profile_blanks_missing_fields() {
        let intro = introspection("u1", "c1", "read");
        let prof = profile(serde_json::json!({
            "sub": "u1",
            "name": "Alice",
            "groups": ["admins"]
        }));

        let claims = build_claims(&intro, Some(&prof));

        assert_eq!(
            pairs(&claims),
            vec![
                ("CLIENT_ID", "c1"),
                ("CLIENT_SCOPE", "read"),
                ("USER_ID", "u1"),
                ("USER_NAME", "Alice"),
                ("USER_EMAIL", ""),
                ("USER_COMPANY", ""),
                ("USER_DEPARTMENT", ""),
                ("USER_GROUP", "admins"),
            ]
        );
    }

    #[test]
    fn test_build_claims_empty_groups_emits_no_group_claims() {
        let intro = introspection("u1", "c1", "");
        let prof = profile(serde_json::json!({"sub": "u1", "groups": []}));

        let claims = build_claims(&intro, Some(&prof));

        assert!(claims
            .iter()
            .all(|c| c.claim_type != claim_types::USER_GROUP));
    }

    #[test]
    fn test_identity_accessors() {
        let intro = introspection("u1", "c1", "read write");
        let prof = profile(serde_json::json!({
            "sub": "u1",
            "name": "Alice",
            "email": "alice@example.com",
            "groups": ["admins", "staff"]
        }));

        let identity = Identity::new(build_claims(&intro, Some(&prof)));

        assert_eq!(identity.user_id(), Some("u1"));
        assert_eq!(identity.client_id(), Some("c1"));
        assert_eq!(identity.display_name(), "Alice");
        assert_eq!(identity.email(), "alice@example.com");
        assert_eq!(identity.scopes(), vec!["read", "write"]);
        assert_eq!(identity.groups(), vec!["admins", "staff"]);
        assert!(identity.has_group("admins"));
        assert!(!identity.has_group("admin")); // no partial match
        assert!(!identity.is_empty());
    }

    #[test]
    fn test_identity_display_name_defaults_to_empty() {
        let identity = Identity::new(vec![ClaimEntry::new(claim_types::USER_ID, "u1")]);
        assert_eq!(identity.display_name(), "");
    }

    #[test]
    fn test_identity_clone_shares_claims() {
        let identity = Identity::new(vec![ClaimEntry::new(claim_types::USER_ID, "u1")]);
        let clone = identity.clone();

        assert_eq!(identity.claims(), clone.claims());
    }

    #[test]
    fn test_identity_debug_hides_claim_values() {
        let identity = Identity::new(vec![ClaimEntry::new(claim_types::USER_ID, "secret-sub")]);

        let debug_str = format!("{:?}", identity);
        assert!(!debug_str.contains("secret-sub"));
    }

    #[test]
    fn test_claim_entry_serializes_with_type_field() {
        let entry = ClaimEntry::new(claim_types::USER_NAME, "Alice");
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(json, r#"{"type":"USER_NAME","value":"Alice"}"#);
    }
}
