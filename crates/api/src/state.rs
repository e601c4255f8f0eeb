use std::sync::Arc;

use jetvision_apollo::ApolloClient;
use jetvision_avainode::AvainodeClient;
use jetvision_cache::SessionStore;
use jetvision_core::rate_limit::RateLimiter;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Apollo.io client.
    pub apollo: Arc<ApolloClient>,
    /// Avainode client.
    pub avainode: Arc<AvainodeClient>,
    /// Rate limiter shared with both clients, for usage snapshots.
    pub limiter: Arc<RateLimiter>,
    /// Session metadata store.
    pub sessions: SessionStore,
}
