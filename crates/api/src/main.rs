use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jetvision_api::config::ServerConfig;
use jetvision_api::router::build_app_router;
use jetvision_api::state::AppState;
use jetvision_apollo::{ApolloClient, ApolloConfig};
use jetvision_avainode::{AvainodeClient, AvainodeConfig};
use jetvision_cache::{MemoryStore, RedisStore, ResponseCache, SessionStore, StoreBackend};
use jetvision_core::rate_limit::RateLimiter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jetvision_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Cache store ---
    let store = match &config.redis_url {
        Some(url) => {
            let redis = RedisStore::connect(url)
                .await
                .expect("Failed to connect to Redis");
            StoreBackend::Redis(redis)
        }
        None => {
            tracing::warn!("REDIS_URL not set, caching in memory");
            StoreBackend::Memory(MemoryStore::new())
        }
    };
    let store = Arc::new(store);
    let response_cache = ResponseCache::new(Arc::clone(&store));
    let sessions = SessionStore::new(Arc::clone(&store));

    // --- Rate limiter (shared across both clients and the API) ---
    let limiter = Arc::new(RateLimiter::new());

    // --- Vendor clients ---
    let mut apollo_config = ApolloConfig::new(config.apollo_api_key.clone());
    if let Some(url) = &config.apollo_base_url {
        apollo_config.base_url = url.clone();
    }
    apollo_config.retry = config.vendor_retry.clone();
    let apollo = Arc::new(
        ApolloClient::new(apollo_config, Arc::clone(&limiter)).with_cache(response_cache.clone()),
    );

    let mut avainode_config = AvainodeConfig::new(config.avainode_api_key.clone());
    if let Some(url) = &config.avainode_base_url {
        avainode_config.base_url = url.clone();
    }
    avainode_config.retry = config.vendor_retry.clone();
    let avainode = Arc::new(
        AvainodeClient::new(avainode_config, Arc::clone(&limiter))
            .with_cache(response_cache.clone()),
    );

    tracing::info!("Vendor clients initialized");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        apollo,
        avainode,
        limiter,
        sessions,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
