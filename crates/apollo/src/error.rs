use jetvision_core::error::CoreError;

/// Errors from the Apollo client.
#[derive(Debug, thiserror::Error)]
pub enum ApolloError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Apollo returned a non-2xx status not covered by a typed variant.
    #[error("Apollo API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The local limiter rejected the call, or Apollo kept returning 429
    /// until the retry budget ran out.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Apollo rejected the configured credentials (401/403).
    #[error("Apollo rejected the configured credentials ({status})")]
    Auth { status: u16 },

    /// A domain error raised before any request was sent.
    #[error(transparent)]
    Core(CoreError),
}

impl From<CoreError> for ApolloError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::RateLimited { retry_after_secs } => {
                ApolloError::RateLimited { retry_after_secs }
            }
            other => ApolloError::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn limiter_rejection_maps_to_rate_limited() {
        let err: ApolloError = CoreError::RateLimited { retry_after_secs: 9 }.into();
        assert_matches!(err, ApolloError::RateLimited { retry_after_secs: 9 });
    }

    #[test]
    fn validation_maps_to_core() {
        let err: ApolloError = CoreError::Validation("missing signals".into()).into();
        assert_matches!(err, ApolloError::Core(CoreError::Validation(_)));
    }
}
