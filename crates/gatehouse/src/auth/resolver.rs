//! Authentication resolver.
//!
//! The per-request state machine: extract the bearer token, consult the
//! claims cache, and on a miss run the two-stage remote lookup
//! (introspection, then best-effort profile) before caching the merged
//! claim list with a bounded expiry.
//!
//! Failure posture: every remote problem (outage, non-200, bad body)
//! collapses to "no result", never an error. An unreachable provider
//! degrades to "treat the request as unauthenticated".

use crate::auth::cache::ClaimsCache;
use crate::auth::claims::{build_claims, Identity};
use crate::services::oidc::IdentityApi;
use axum::http::{header, HeaderMap};
use chrono::Duration;
use common::clock::Clock;
use std::sync::Arc;
use tracing::instrument;

/// Longest a resolved claim set may be served from cache. Bounds how long
/// a token revoked at the provider can keep authenticating locally.
pub const MAX_CACHE_TTL_MINUTES: i64 = 15;

/// Namespace prefix for cache keys. The raw token follows the prefix.
const CACHE_KEY_PREFIX: &str = "oidc:at:";

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of one authentication attempt.
///
/// `NoResult` covers both "no credential presented" and "credential not
/// active", so any later mechanism in the pipeline still gets its turn;
/// with none registered the pipeline default is unauthenticated. The
/// challenge and forbidden bodies are the error writers' concern, not
/// resolver states.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Token accepted; the resolved identity travels with the request.
    Success(Identity),

    /// No usable credential. Defer to other mechanisms.
    NoResult,
}

/// Per-request authentication state machine.
///
/// Shared across requests behind an `Arc`; each request runs its steps
/// sequentially on its own task, suspending at the two remote-call
/// points. The cache is the only shared mutable resource. Concurrent cold
/// misses for the same token each introspect and each write the cache;
/// the writes are idempotent within the token's validity window, so this
/// stays a bounded inefficiency rather than a correctness problem.
pub struct AuthResolver {
    api: Arc<dyn IdentityApi>,
    cache: Arc<dyn ClaimsCache>,
    clock: Arc<dyn Clock>,
}

impl AuthResolver {
    /// Create a resolver.
    pub fn new(api: Arc<dyn IdentityApi>, cache: Arc<dyn ClaimsCache>, clock: Arc<dyn Clock>) -> Self {
        Self { api, cache, clock }
    }

    /// Authenticate one request from its headers.
    #[instrument(skip_all, name = "gate.auth.resolve")]
    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome {
        let Some(token) = bearer_token(headers) else {
            tracing::debug!(target: "gate.auth.resolver", "No bearer credential presented");
            return AuthOutcome::NoResult;
        };

        if token.trim().is_empty() {
            tracing::debug!(target: "gate.auth.resolver", "Bearer credential is blank");
            return AuthOutcome::NoResult;
        }

        let cache_key = format!("{CACHE_KEY_PREFIX}{token}");

        if let Some(identity) = self.cache.get(&cache_key).await {
            if !identity.is_empty() {
                tracing::debug!(target: "gate.auth.resolver", "Claims cache hit");
                return AuthOutcome::Success(identity);
            }
        }

        // Cache miss: validate the token at the provider.
        let Some(introspection) = self.api.introspect(token).await else {
            tracing::debug!(
                target: "gate.auth.resolver",
                "Introspection unavailable; treating token as inactive"
            );
            return AuthOutcome::NoResult;
        };

        if !introspection.active {
            tracing::debug!(target: "gate.auth.resolver", "Token is not active");
            return AuthOutcome::NoResult;
        }

        // Token is active. Second query for the user's profile;
        // best-effort, a miss only blanks the profile-derived values.
        let profile = self.api.fetch_profile(token).await;
        if profile.is_none() {
            tracing::debug!(
                target: "gate.auth.resolver",
                "Profile lookup unavailable; profile claims will be empty"
            );
        }

        let identity = Identity::new(build_claims(&introspection, profile.as_ref()));

        // Cache until the fixed ceiling or the token's own expiry,
        // whichever is sooner. The write happens only after both remote
        // calls complete, so an abandoned request writes nothing.
        let now = self.clock.now();
        let expires_at = (now + Duration::minutes(MAX_CACHE_TTL_MINUTES)).min(introspection.expires_at());
        if expires_at > now {
            self.cache.set(&cache_key, identity.clone(), expires_at).await;
        } else {
            tracing::debug!(
                target: "gate.auth.resolver",
                "Token expires before it could be cached; serving uncached"
            );
        }

        tracing::debug!(target: "gate.auth.resolver", "Token resolved successfully");
        AuthOutcome::Success(identity)
    }
}

/// Select the first `Authorization` value with a case-insensitive
/// `Bearer ` prefix and return the raw token after it.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::AUTHORIZATION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            let prefix = value.get(..BEARER_PREFIX.len())?;
            if prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
                value.get(BEARER_PREFIX.len()..)
            } else {
                None
            }
        })
}
