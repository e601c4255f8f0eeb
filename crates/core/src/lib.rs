//! Shared domain logic for the JetVision charter-data gateway.
//!
//! This crate has no internal dependencies and holds the pieces used by
//! both vendor clients and the API server: the error taxonomy, pure
//! validation functions, the sliding-window rate limiter, the 429 retry
//! policy, and API key hashing.

pub mod api_keys;
pub mod error;
pub mod hashing;
pub mod rate_limit;
pub mod retry;
pub mod validation;
