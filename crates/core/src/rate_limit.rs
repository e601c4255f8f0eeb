//! Sliding-window request rate limiter.
//!
//! Each vendor endpoint gets its own window: a list of admission instants
//! from the last 60 seconds. A call is admitted if, after dropping instants
//! older than the window, fewer than the category limit remain. Rejected
//! calls consume no window capacity.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::CoreError;

/// Length of the sliding window.
pub const WINDOW: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Per-minute request budget tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCategory {
    /// Default tier for single-record vendor operations.
    Standard,
    /// Bulk operations (batch enrichment, sequence additions).
    Bulk,
    /// Charter marketplace operations (Avainode grants a higher quota).
    Charter,
}

impl RateCategory {
    /// Maximum admissions per [`WINDOW`] for this category.
    pub fn limit(self) -> u32 {
        match self {
            RateCategory::Standard => 60,
            RateCategory::Bulk => 30,
            RateCategory::Charter => 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Usage snapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of one endpoint's window, surfaced in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RateUsage {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
    /// Seconds until the oldest admission leaves the window (0 when idle).
    pub resets_in_secs: u64,
}

// ---------------------------------------------------------------------------
// Limiter
// ---------------------------------------------------------------------------

/// In-memory sliding-window limiter keyed by endpoint name.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to admit a call for `key` under `category`.
    ///
    /// Returns [`CoreError::RateLimited`] with the seconds until capacity
    /// frees up when the window is full.
    pub fn try_acquire(&self, key: &str, category: RateCategory) -> Result<(), CoreError> {
        self.try_acquire_at(key, category, Instant::now())
    }

    /// Usage snapshot for `key` as of now.
    pub fn usage(&self, key: &str, category: RateCategory) -> RateUsage {
        self.usage_at(key, category, Instant::now())
    }

    fn try_acquire_at(
        &self,
        key: &str,
        category: RateCategory,
        now: Instant,
    ) -> Result<(), CoreError> {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let window = windows.entry(key.to_string()).or_default();
        prune(window, now);

        if window.len() as u32 >= category.limit() {
            // Full window always has a front entry (limits are >= 1).
            let oldest = *window.front().expect("full window is non-empty");
            let retry_after = WINDOW.saturating_sub(now.duration_since(oldest));
            let retry_after_secs = retry_after.as_secs().max(1);
            tracing::warn!(
                key,
                limit = category.limit(),
                retry_after_secs,
                "Rate limit window full, rejecting request",
            );
            return Err(CoreError::RateLimited { retry_after_secs });
        }

        window.push_back(now);
        Ok(())
    }

    fn usage_at(&self, key: &str, category: RateCategory, now: Instant) -> RateUsage {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let limit = category.limit();

        let (used, resets_in_secs) = match windows.get_mut(key) {
            Some(window) => {
                prune(window, now);
                let resets = window
                    .front()
                    .map(|oldest| WINDOW.saturating_sub(now.duration_since(*oldest)).as_secs())
                    .unwrap_or(0);
                (window.len() as u32, resets)
            }
            None => (0, 0),
        };

        RateUsage {
            limit,
            used,
            remaining: limit.saturating_sub(used),
            resets_in_secs,
        }
    }
}

/// Drop admissions older than [`WINDOW`] from the front of the queue.
fn prune(window: &mut VecDeque<Instant>, now: Instant) {
    while let Some(oldest) = window.front() {
        if now.duration_since(*oldest) >= WINDOW {
            window.pop_front();
        } else {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn admits_up_to_limit() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..RateCategory::Bulk.limit() {
            assert!(limiter
                .try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now)
                .is_ok());
        }
    }

    #[test]
    fn rejects_above_limit() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..RateCategory::Bulk.limit() {
            limiter
                .try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now)
                .unwrap();
        }
        let err = limiter
            .try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now)
            .unwrap_err();
        assert_matches!(err, CoreError::RateLimited { retry_after_secs } if retry_after_secs >= 1);
    }

    #[test]
    fn readmits_after_window_slides() {
        let limiter = RateLimiter::new();
        let base = Instant::now();
        for _ in 0..RateCategory::Standard.limit() {
            limiter
                .try_acquire_at("apollo:search", RateCategory::Standard, base)
                .unwrap();
        }
        assert!(limiter
            .try_acquire_at("apollo:search", RateCategory::Standard, base)
            .is_err());

        // 61 seconds later every admission has left the window.
        let later = base + Duration::from_secs(61);
        assert!(limiter
            .try_acquire_at("apollo:search", RateCategory::Standard, later)
            .is_ok());
    }

    #[test]
    fn keys_have_independent_windows() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..RateCategory::Bulk.limit() {
            limiter
                .try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now)
                .unwrap();
        }
        assert!(limiter
            .try_acquire_at("avainode:search", RateCategory::Charter, now)
            .is_ok());
    }

    #[test]
    fn rejected_call_consumes_no_capacity() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        for _ in 0..RateCategory::Bulk.limit() {
            limiter
                .try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now)
                .unwrap();
        }
        let _ = limiter.try_acquire_at("apollo:bulk_match", RateCategory::Bulk, now);
        let usage = limiter.usage_at("apollo:bulk_match", RateCategory::Bulk, now);
        assert_eq!(usage.used, RateCategory::Bulk.limit());
    }

    #[test]
    fn usage_reflects_admissions() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        limiter
            .try_acquire_at("avainode:fleet", RateCategory::Charter, now)
            .unwrap();
        limiter
            .try_acquire_at("avainode:fleet", RateCategory::Charter, now)
            .unwrap();

        let usage = limiter.usage_at("avainode:fleet", RateCategory::Charter, now);
        assert_eq!(usage.limit, 100);
        assert_eq!(usage.used, 2);
        assert_eq!(usage.remaining, 98);
        assert!(usage.resets_in_secs <= 60);
    }

    #[test]
    fn usage_for_unknown_key_is_idle() {
        let limiter = RateLimiter::new();
        let usage = limiter.usage("never-called", RateCategory::Standard);
        assert_eq!(usage.used, 0);
        assert_eq!(usage.remaining, 60);
        assert_eq!(usage.resets_in_secs, 0);
    }
}
