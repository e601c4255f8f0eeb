//! Read-through cache for vendor GET/search responses.
//!
//! Keys fingerprint the endpoint plus its parameters, so two requests for
//! the same data hit the same entry regardless of JSON field ordering.
//! Store failures are logged and treated as misses -- a dead Redis must
//! never take the gateway down with it.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use jetvision_core::hashing::sha256_hex;

use crate::store::{StateStore, StoreBackend};

/// TTL for cached vendor responses.
pub const RESPONSE_TTL_SECS: u64 = 180;

/// Characters of the parameter fingerprint kept in the key.
const FINGERPRINT_LEN: usize = 16;

/// Read-through response cache over a [`StoreBackend`].
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<StoreBackend>,
    ttl_secs: u64,
}

impl ResponseCache {
    pub fn new(store: Arc<StoreBackend>) -> Self {
        Self::with_ttl(store, RESPONSE_TTL_SECS)
    }

    pub fn with_ttl(store: Arc<StoreBackend>, ttl_secs: u64) -> Self {
        Self { store, ttl_secs }
    }

    /// Build the cache key for a vendor endpoint and its parameters.
    ///
    /// Format: `cache:{vendor}:{endpoint}:{sha256(params)[..16]}`. The
    /// parameter JSON is canonicalized (recursively key-sorted) first, so
    /// equivalent requests share an entry.
    pub fn cache_key(vendor: &str, endpoint: &str, params: &Value) -> String {
        let canonical = canonicalize(params).to_string();
        let fingerprint = sha256_hex(canonical.as_bytes());
        format!(
            "cache:{vendor}:{endpoint}:{}",
            &fingerprint[..FINGERPRINT_LEN]
        )
    }

    /// Look up `key`, calling `fetch` on a miss and storing its result.
    ///
    /// Fetch errors propagate unchanged and are never cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.store.get::<T>(key).await {
            Ok(Some(cached)) => {
                tracing::debug!(key, "Response cache hit");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key, error = %e, "Response cache read failed, fetching");
            }
        }

        let value = fetch().await?;

        if let Err(e) = self.store.set(key, &value, Some(self.ttl_secs)).await {
            tracing::warn!(key, error = %e, "Response cache write failed");
        }

        Ok(value)
    }

    /// Drop a cached entry, e.g. after a mutation made it stale.
    ///
    /// Best-effort: a failed delete is logged and the entry ages out via
    /// its TTL instead.
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            tracing::warn!(key, error = %e, "Response cache invalidation failed");
        }
    }
}

/// Recursively rebuild objects with sorted keys.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: std::collections::BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn memory_cache() -> ResponseCache {
        ResponseCache::new(Arc::new(StoreBackend::Memory(MemoryStore::new())))
    }

    #[test]
    fn key_stable_across_param_order() {
        let a = json!({"from": "KTEB", "to": "KVNY", "pax": 4});
        let b = json!({"pax": 4, "to": "KVNY", "from": "KTEB"});
        assert_eq!(
            ResponseCache::cache_key("avainode", "aircraft_search", &a),
            ResponseCache::cache_key("avainode", "aircraft_search", &b),
        );
    }

    #[test]
    fn key_distinct_across_endpoints() {
        let params = json!({"from": "KTEB"});
        assert_ne!(
            ResponseCache::cache_key("avainode", "aircraft_search", &params),
            ResponseCache::cache_key("avainode", "empty_legs", &params),
        );
    }

    #[test]
    fn key_distinct_across_params() {
        assert_ne!(
            ResponseCache::cache_key("apollo", "people_search", &json!({"q": "aviation"})),
            ResponseCache::cache_key("apollo", "people_search", &json!({"q": "charter"})),
        );
    }

    #[test]
    fn nested_objects_canonicalized() {
        let a = json!({"filter": {"b": 1, "a": 2}});
        let b = json!({"filter": {"a": 2, "b": 1}});
        assert_eq!(
            ResponseCache::cache_key("apollo", "people_search", &a),
            ResponseCache::cache_key("apollo", "people_search", &b),
        );
    }

    #[tokio::test]
    async fn miss_fetches_and_stores() {
        let cache = memory_cache();
        let value: Result<String, &str> = cache
            .get_or_fetch("cache:t:one", || async { Ok("fresh".to_string()) })
            .await;
        assert_eq!(value.unwrap(), "fresh");

        // Second call is served from the cache, not the new closure.
        let value: Result<String, &str> = cache
            .get_or_fetch("cache:t:one", || async { Ok("refetched".to_string()) })
            .await;
        assert_eq!(value.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn fetch_error_propagates_and_is_not_cached() {
        let cache = memory_cache();
        let result: Result<String, String> = cache
            .get_or_fetch("cache:t:err", || async { Err("upstream down".to_string()) })
            .await;
        assert!(result.is_err());

        // The failure was not cached; the next fetch runs and succeeds.
        let result: Result<String, String> = cache
            .get_or_fetch("cache:t:err", || async { Ok("recovered".to_string()) })
            .await;
        assert_eq!(result.unwrap(), "recovered");
    }
}
