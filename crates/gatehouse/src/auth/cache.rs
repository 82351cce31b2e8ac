//! Time-bounded claims cache.
//!
//! Maps a namespaced access token to the claim list resolved for it, so a
//! hot token costs zero remote calls until its entry expires. The cache is
//! process-local and never persisted: it is a short-lived performance
//! optimization, not a source of truth. The remote identity API always
//! wins on disagreement, which a short TTL guarantees structurally.
//!
//! # Security
//!
//! Keys contain raw token values (namespaced, not hashed), so entries are
//! sensitive while resident in memory.

use crate::auth::claims::Identity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::clock::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keyed TTL store for resolved claim lists.
///
/// Implementations must tolerate same-key races: last `set` wins, and a
/// concurrent `get` observes either complete value, never a partial one.
#[async_trait]
pub trait ClaimsCache: Send + Sync + 'static {
    /// Fetch the identity cached under `key`, or `None` when absent or
    /// expired.
    async fn get(&self, key: &str) -> Option<Identity>;

    /// Store `identity` under `key` until `expires_at`. A write whose
    /// expiry is not in the future is dropped.
    async fn set(&self, key: &str, identity: Identity, expires_at: DateTime<Utc>);
}

/// One cached entry: the shared claim list plus its deadline.
struct CacheSlot {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// Process-local, in-memory claims cache.
///
/// Expiry is lazy: `get` treats stale entries as misses. A periodic
/// [`purge_expired`](MemoryClaimsCache::purge_expired) sweep keeps stale
/// entries from accumulating between lookups.
pub struct MemoryClaimsCache {
    entries: RwLock<HashMap<String, CacheSlot>>,
    clock: Arc<dyn Clock>,
}

impl MemoryClaimsCache {
    /// Create an empty cache driven by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Drop every entry whose deadline has passed.
    pub async fn purge_expired(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, slot| slot.expires_at > now);

        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(target: "gate.auth.cache", purged, "Purged expired claims entries");
        }
    }

    /// Number of entries currently held, expired or not.
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ClaimsCache for MemoryClaimsCache {
    async fn get(&self, key: &str) -> Option<Identity> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(slot) if slot.expires_at > self.clock.now() => Some(slot.identity.clone()),
            _ => None,
        }
    }

    async fn set(&self, key: &str, identity: Identity, expires_at: DateTime<Utc>) {
        // Invariant: no entry is ever stored already expired.
        if expires_at <= self.clock.now() {
            tracing::debug!(target: "gate.auth.cache", "Dropping cache write with past expiry");
            return;
        }

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheSlot {
            identity,
            expires_at,
        });
    }
}
