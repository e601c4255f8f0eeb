//! Redis store backend.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::CacheError;
use crate::store::StateStore;

/// Redis-backed store using a multiplexed [`ConnectionManager`].
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        tracing::info!(url, "Connecting to Redis");

        let client =
            Client::open(url).map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::ConnectionFailed(e.to_string()))?;

        tracing::info!("Connected to Redis");

        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStore for RedisStore {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut conn = self.conn.clone();

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::GetFailed(e.to_string()))?;

        match value {
            Some(v) => {
                let parsed = serde_json::from_str(&v)
                    .map_err(|e| CacheError::Deserialization(e.to_string()))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        let serialized =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;

        tracing::debug!(key, ttl_secs = ?ttl_secs, "Setting cache key");

        if let Some(ttl) = ttl_secs {
            conn.set_ex(key, &serialized, ttl)
                .await
                .map_err(|e| CacheError::SetFailed(e.to_string()))
        } else {
            conn.set(key, &serialized)
                .await
                .map_err(|e| CacheError::SetFailed(e.to_string()))
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del(key)
            .await
            .map_err(|e| CacheError::DeleteFailed(e.to_string()))
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();

        conn.exists(key)
            .await
            .map_err(|e| CacheError::QueryFailed(e.to_string()))
    }
}
