//! Session metadata store.
//!
//! Sessions are short-lived request-correlation records keyed by the
//! caller-supplied `X-Session-Id` header. Each request through the gateway
//! touches its session, bumping the counter and refreshing the TTL.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::store::{StateStore, StoreBackend};

/// Session TTL: one hour, refreshed on every touch.
pub const SESSION_TTL_SECS: u64 = 3600;

/// Metadata kept per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    /// Number of gateway requests seen for this session.
    pub request_count: u64,
    /// Endpoint name of the most recent request.
    pub last_endpoint: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Store for [`SessionRecord`]s under `sessions:{id}` keys.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<StoreBackend>,
}

impl SessionStore {
    pub fn new(store: Arc<StoreBackend>) -> Self {
        Self { store }
    }

    fn key(session_id: &str) -> String {
        format!("sessions:{session_id}")
    }

    /// Fetch a session record, if present and unexpired.
    pub async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, CacheError> {
        self.store.get(&Self::key(session_id)).await
    }

    /// Record a request for `session_id` against `endpoint`.
    ///
    /// Creates the record on first sight; otherwise increments the counter
    /// and updates the last-seen timestamp. Either way the TTL restarts.
    pub async fn touch(
        &self,
        session_id: &str,
        endpoint: &str,
    ) -> Result<SessionRecord, CacheError> {
        let now = Utc::now();
        let record = match self.get(session_id).await? {
            Some(mut existing) => {
                existing.request_count += 1;
                existing.last_endpoint = endpoint.to_string();
                existing.last_seen_at = now;
                existing
            }
            None => SessionRecord {
                session_id: session_id.to_string(),
                request_count: 1,
                last_endpoint: endpoint.to_string(),
                created_at: now,
                last_seen_at: now,
            },
        };

        self.store
            .set(&Self::key(session_id), &record, Some(SESSION_TTL_SECS))
            .await?;

        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn memory_sessions() -> SessionStore {
        SessionStore::new(Arc::new(StoreBackend::Memory(MemoryStore::new())))
    }

    #[tokio::test]
    async fn first_touch_creates_record() {
        let sessions = memory_sessions();
        let record = sessions.touch("sess-1", "avainode:search").await.unwrap();

        assert_eq!(record.session_id, "sess-1");
        assert_eq!(record.request_count, 1);
        assert_eq!(record.last_endpoint, "avainode:search");
    }

    #[tokio::test]
    async fn repeated_touch_increments_counter() {
        let sessions = memory_sessions();
        sessions.touch("sess-1", "avainode:search").await.unwrap();
        sessions.touch("sess-1", "avainode:pricing").await.unwrap();
        let record = sessions.touch("sess-1", "apollo:people_search").await.unwrap();

        assert_eq!(record.request_count, 3);
        assert_eq!(record.last_endpoint, "apollo:people_search");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let sessions = memory_sessions();
        sessions.touch("sess-1", "a").await.unwrap();
        sessions.touch("sess-2", "b").await.unwrap();

        let one = sessions.get("sess-1").await.unwrap().unwrap();
        let two = sessions.get("sess-2").await.unwrap().unwrap();
        assert_eq!(one.request_count, 1);
        assert_eq!(two.request_count, 1);
        assert_eq!(one.last_endpoint, "a");
        assert_eq!(two.last_endpoint, "b");
    }

    #[tokio::test]
    async fn unknown_session_reads_as_none() {
        let sessions = memory_sessions();
        assert!(sessions.get("ghost").await.unwrap().is_none());
    }
}
