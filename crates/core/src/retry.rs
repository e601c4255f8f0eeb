//! Bounded retry policy for vendor `429 Too Many Requests` responses.
//!
//! Vendors advertise when to come back via the `Retry-After` header. The
//! policy honors that hint (capped), falls back to doubling backoff when
//! the header is absent or unparsable, and always bounds the total number
//! of attempts.

use std::time::Duration;

/// Tunable parameters for the 429 retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first request.
    pub max_attempts: u32,
    /// Delay before the first retry when the vendor sends no hint.
    pub initial_backoff: Duration,
    /// Upper bound on any single delay, including `Retry-After` hints.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following the `attempt`-th failure (1-based).
    ///
    /// A parsed `Retry-After` hint wins over the computed backoff; both are
    /// clamped to [`max_backoff`](Self::max_backoff).
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let fallback = self
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        retry_after.unwrap_or(fallback).min(self.max_backoff)
    }
}

/// Parse a `Retry-After` header value in delta-seconds form.
///
/// HTTP-date values and garbage return `None`; callers fall back to the
/// policy's computed backoff.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delta_seconds() {
        assert_eq!(parse_retry_after("17"), Some(Duration::from_secs(17)));
    }

    #[test]
    fn parses_with_whitespace() {
        assert_eq!(parse_retry_after(" 5 "), Some(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_http_date_form() {
        assert_eq!(parse_retry_after("Wed, 21 Oct 2025 07:28:00 GMT"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_retry_after("soon"), None);
        assert_eq!(parse_retry_after(""), None);
        assert_eq!(parse_retry_after("-3"), None);
    }

    #[test]
    fn retry_after_hint_wins() {
        let policy = RetryPolicy::default();
        let d = policy.delay_for(1, Some(Duration::from_secs(7)));
        assert_eq!(d, Duration::from_secs(7));
    }

    #[test]
    fn hint_clamped_to_max_backoff() {
        let policy = RetryPolicy::default();
        let d = policy.delay_for(1, Some(Duration::from_secs(300)));
        assert_eq!(d, policy.max_backoff);
    }

    #[test]
    fn fallback_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1, None), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2, None), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3, None), Duration::from_secs(4));
    }

    #[test]
    fn fallback_clamped_to_max_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(10, None), policy.max_backoff);
    }
}
