use jetvision_core::error::CoreError;

/// Errors from the Avainode client.
#[derive(Debug, thiserror::Error)]
pub enum AvainodeError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Avainode returned a non-2xx status not covered by a typed variant.
    #[error("Avainode API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The local limiter rejected the call, or Avainode kept returning
    /// 429 until the retry budget ran out.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Avainode rejected the configured credentials (401/403).
    #[error("Avainode rejected the configured credentials ({status})")]
    Auth { status: u16 },

    /// A domain error raised before any request was sent.
    #[error(transparent)]
    Core(CoreError),
}

impl From<CoreError> for AvainodeError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::RateLimited { retry_after_secs } => {
                AvainodeError::RateLimited { retry_after_secs }
            }
            other => AvainodeError::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn limiter_rejection_maps_to_rate_limited() {
        let err: AvainodeError = CoreError::RateLimited {
            retry_after_secs: 12,
        }
        .into();
        assert_matches!(err, AvainodeError::RateLimited { retry_after_secs: 12 });
    }

    #[test]
    fn validation_maps_to_core() {
        let err: AvainodeError = CoreError::Validation("bad airport".into()).into();
        assert_matches!(err, AvainodeError::Core(CoreError::Validation(_)));
    }
}
