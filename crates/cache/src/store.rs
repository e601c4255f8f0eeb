//! Storage trait and backends.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::error::CacheError;
use crate::redis_store::RedisStore;

/// Key-value store with optional per-key TTL (Redis-like).
///
/// Values are serialized to JSON strings so both backends hold the same
/// representation.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get a value by key. Expired or missing keys return `None`.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError>;

    /// Set a value with an optional TTL in seconds.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<(), CacheError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether a key exists (and is unexpired).
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// In-memory store used in tests and Redis-less deployments.
///
/// Entries are lazily evicted: an expired entry is treated as absent on
/// read and overwritten on the next set.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if entry.is_expired(Instant::now()) {
            return Ok(None);
        }
        let parsed = serde_json::from_str(&entry.value)
            .map_err(|e| CacheError::Deserialization(e.to_string()))?;
        Ok(Some(parsed))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<(), CacheError> {
        let serialized =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let expires_at = ttl_secs.map(|secs| Instant::now() + Duration::from_secs(secs));

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: serialized,
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .is_some_and(|e| !e.is_expired(Instant::now())))
    }
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Runtime-selected backend: Redis when `REDIS_URL` is configured,
/// in-memory otherwise.
pub enum StoreBackend {
    Redis(RedisStore),
    Memory(MemoryStore),
}

#[async_trait]
impl StateStore for StoreBackend {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self {
            StoreBackend::Redis(s) => s.get(key).await,
            StoreBackend::Memory(s) => s.get(key).await,
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<(), CacheError> {
        match self {
            StoreBackend::Redis(s) => s.set(key, value, ttl_secs).await,
            StoreBackend::Memory(s) => s.set(key, value, ttl_secs).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        match self {
            StoreBackend::Redis(s) => s.delete(key).await,
            StoreBackend::Memory(s) => s.delete(key).await,
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match self {
            StoreBackend::Redis(s) => s.exists(key).await,
            StoreBackend::Memory(s) => s.exists(key).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = MemoryStore::new();
        store.set("k", &serde_json::json!({"a": 1}), None).await.unwrap();

        let value: Option<serde_json::Value> = store.get("k").await.unwrap();
        assert_eq!(value, Some(serde_json::json!({"a": 1})));
    }

    #[tokio::test]
    async fn missing_key_returns_none() {
        let store = MemoryStore::new();
        let value: Option<String> = store.get("absent").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn delete_removes_key() {
        let store = MemoryStore::new();
        store.set("k", &"v", None).await.unwrap();
        store.delete("k").await.unwrap();
        assert!(!store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entry_reads_as_absent() {
        let store = MemoryStore::new();
        // Insert an entry that expired one second ago.
        store.entries.write().await.insert(
            "stale".to_string(),
            Entry {
                value: "\"v\"".to_string(),
                expires_at: Some(Instant::now() - Duration::from_secs(1)),
            },
        );

        let value: Option<String> = store.get("stale").await.unwrap();
        assert!(value.is_none());
        assert!(!store.exists("stale").await.unwrap());
    }

    #[tokio::test]
    async fn unexpired_ttl_entry_still_readable() {
        let store = MemoryStore::new();
        store.set("k", &"v", Some(60)).await.unwrap();
        let value: Option<String> = store.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some("v"));
    }
}
