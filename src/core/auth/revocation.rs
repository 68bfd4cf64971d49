//! Token revocation store
//!
//! Logout for otherwise-stateless bearer tokens: a revoked token id is
//! denylisted until its natural expiry. Entries expire lazily, on the read
//! that finds them stale, so no background sweeper is needed.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Server-side denylist for token ids
///
/// Swappable behind this trait so a shared store could replace the
/// in-memory map without touching token verification.
pub trait TokenStore: Send + Sync {
    /// Record that `jti` must be rejected until `until`. Revoking an id
    /// twice overwrites with the latest instant.
    fn revoke(&self, jti: &str, until: DateTime<Utc>);

    /// True iff a record for `jti` exists and its instant is still in the
    /// future. A record past its instant is removed as a side effect and
    /// reported as not revoked.
    fn is_revoked(&self, jti: &str) -> bool;
}

/// In-memory revocation store
///
/// Safe under arbitrary concurrent readers and writers; each entry is
/// updated atomically, no external locking required.
#[derive(Debug, Default)]
pub struct RevocationStore {
    revoked: DashMap<String, DateTime<Utc>>,
}

impl RevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records (expired-but-unread entries included)
    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

impl TokenStore for RevocationStore {
    fn revoke(&self, jti: &str, until: DateTime<Utc>) {
        self.revoked.insert(jti.to_string(), until);
    }

    fn is_revoked(&self, jti: &str) -> bool {
        let until = match self.revoked.get(jti) {
            Some(entry) => *entry,
            None => return false,
        };

        if Utc::now() < until {
            return true;
        }

        // Lazy eviction. The read guard is dropped above; only remove the
        // record we actually observed, so a concurrent re-revoke survives.
        self.revoked.remove_if(jti, |_, stored| *stored == until);
        false
    }
}
