//! Claims echo handler.
//!
//! Returns the ordered claim pairs for the authenticated caller, exactly
//! as they were resolved and cached. Useful for consumers wiring up
//! group-based authorization.

use crate::auth::claims::{ClaimEntry, Identity};
use axum::{Extension, Json};
use tracing::instrument;

/// Handler for GET /v1/claims
///
/// Returns the caller's claims as an ordered array of `(type, value)`
/// pairs.
///
/// ## Response
///
/// ```json
/// [
///   {"type": "CLIENT_ID", "value": "c1"},
///   {"type": "USER_ID", "value": "u1"}
/// ]
/// ```
#[instrument(skip_all, name = "gate.handlers.claims")]
pub async fn show_claims(Extension(identity): Extension<Identity>) -> Json<Vec<ClaimEntry>> {
    Json(identity.claims().to_vec())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::auth::claims::claim_types;

    #[tokio::test]
    async fn test_show_claims_preserves_order() {
        let identity = Identity::new(vec![
            ClaimEntry::new(claim_types::CLIENT_ID, "c1"),
            ClaimEntry::new(claim_types::USER_ID, "u1"),
            ClaimEntry::new(claim_types::USER_GROUP, "admins"),
        ]);

        let Json(claims) = show_claims(Extension(identity)).await;

        let types: Vec<&str> = claims.iter().map(|c| c.claim_type.as_str()).collect();
        assert_eq!(types, vec!["CLIENT_ID", "USER_ID", "USER_GROUP"]);
    }

    #[tokio::test]
    async fn test_show_claims_serializes_as_pair_array() {
        let identity = Identity::new(vec![ClaimEntry::new(claim_types::USER_ID, "u1")]);

        let Json(claims) = show_claims(Extension(identity)).await;
        let json = serde_json::to_string(&claims).unwrap();

        assert_eq!(json, r#"[{"type":"USER_ID","value":"u1"}]"#);
    }
}
