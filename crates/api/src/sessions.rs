//! In-memory quick-comparison session store.
//!
//! Sessions are ephemeral, keyed by a generated UUID, and expire 24 hours
//! after creation. Expired entries are swept opportunistically on every
//! store access; there is no background eviction task. Thread-safe via
//! interior `RwLock`; designed to be wrapped in `Arc` and shared across the
//! application.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use veriscore_core::ingest::VendorInput;
use veriscore_core::types::Timestamp;

/// How long a quick-comparison session stays retrievable.
pub const SESSION_TTL_HOURS: i64 = 24;

/// One stored quick-comparison session.
#[derive(Debug, Clone)]
pub struct QuickSession {
    /// The vendor inputs the session was created from.
    pub vendors: Vec<VendorInput>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// Serialized comparison results; `None` for upload-only sessions.
    pub results: Option<serde_json::Value>,
}

impl QuickSession {
    /// Build a session starting now with the standard TTL.
    pub fn new(vendors: Vec<VendorInput>, results: Option<serde_json::Value>) -> Self {
        let now = Utc::now();
        Self {
            vendors,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
            results,
        }
    }
}

/// Mutex-guarded session map with sweep-on-access expiry.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, QuickSession>>,
}

impl SessionStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session under the caller's id, sweeping expired entries first.
    ///
    /// Callers generate the id up front (UUID v4) so responses can embed it
    /// before the session is stored.
    pub async fn put(&self, id: Uuid, session: QuickSession) {
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions);
        sessions.insert(id, session);
    }

    /// Fetch a session by id, sweeping expired entries first.
    ///
    /// Returns `None` for unknown or expired ids.
    pub async fn get(&self, id: Uuid) -> Option<QuickSession> {
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions);
        sessions.get(&id).cloned()
    }

    /// Number of live sessions (after a sweep).
    pub async fn len(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions);
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn sweep(sessions: &mut HashMap<Uuid, QuickSession>) {
        let now = Utc::now();
        sessions.retain(|_, session| session.expires_at > now);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vendors() -> Vec<VendorInput> {
        vec![VendorInput {
            name: "Acme".to_string(),
            cost_per_record: 10.0,
            quality_score: Some(88.0),
            pii_completeness: None,
            disposition_accuracy: None,
            avg_freshness_days: None,
            coverage_percentage: None,
            description: None,
        }]
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store
            .put(id, QuickSession::new(vendors(), Some(serde_json::json!({"ok": true}))))
            .await;

        let session = store.get(id).await.expect("session should be live");
        assert_eq!(session.vendors.len(), 1);
        assert_eq!(session.results, Some(serde_json::json!({"ok": true})));
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_on_access() {
        let store = SessionStore::new();

        let expired_id = Uuid::new_v4();
        let mut expired = QuickSession::new(vendors(), None);
        expired.expires_at = Utc::now() - Duration::hours(1);
        store.put(expired_id, expired).await;

        let live_id = Uuid::new_v4();
        store.put(live_id, QuickSession::new(vendors(), None)).await;

        // The expired entry is gone after any access, not just its own get.
        assert!(store.get(expired_id).await.is_none());
        assert!(store.get(live_id).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_expire_after_the_ttl() {
        let session = QuickSession::new(vendors(), None);
        let ttl = session.expires_at - session.created_at;
        assert_eq!(ttl, Duration::hours(SESSION_TTL_HOURS));
    }
}
