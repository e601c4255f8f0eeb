use jetvision_core::api_keys::hash_gateway_key;
use jetvision_core::retry::RetryPolicy;

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development; production overrides via environment
/// variables. The gateway and vendor API keys have no defaults and must be
/// set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SHA-256 digest of `GATEWAY_API_KEY`. The plaintext is dropped at load.
    pub gateway_key_digest: String,
    /// Apollo.io API key.
    pub apollo_api_key: String,
    /// Apollo base URL override (staging/tests).
    pub apollo_base_url: Option<String>,
    /// Avainode API key (bearer token).
    pub avainode_api_key: String,
    /// Avainode base URL override (staging/tests).
    pub avainode_base_url: Option<String>,
    /// Redis connection URL. Absent means the in-memory store.
    pub redis_url: Option<String>,
    /// Vendor 429 retry policy, `max_attempts` from `VENDOR_MAX_RETRIES`.
    pub vendor_retry: RetryPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `GATEWAY_API_KEY`      | (required)                 |
    /// | `APOLLO_API_KEY`       | (required)                 |
    /// | `APOLLO_BASE_URL`      | vendor production URL      |
    /// | `AVAINODE_API_KEY`     | (required)                 |
    /// | `AVAINODE_BASE_URL`    | vendor production URL      |
    /// | `REDIS_URL`            | (unset: in-memory store)   |
    /// | `VENDOR_MAX_RETRIES`   | `3`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let gateway_key =
            std::env::var("GATEWAY_API_KEY").expect("GATEWAY_API_KEY must be set");
        let gateway_key_digest = hash_gateway_key(&gateway_key);

        let apollo_api_key =
            std::env::var("APOLLO_API_KEY").expect("APOLLO_API_KEY must be set");
        let avainode_api_key =
            std::env::var("AVAINODE_API_KEY").expect("AVAINODE_API_KEY must be set");

        let max_attempts: u32 = std::env::var("VENDOR_MAX_RETRIES")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("VENDOR_MAX_RETRIES must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            gateway_key_digest,
            apollo_api_key,
            apollo_base_url: std::env::var("APOLLO_BASE_URL").ok(),
            avainode_api_key,
            avainode_base_url: std::env::var("AVAINODE_BASE_URL").ok(),
            redis_url: std::env::var("REDIS_URL").ok(),
            vendor_retry: RetryPolicy {
                max_attempts,
                ..RetryPolicy::default()
            },
        }
    }
}
