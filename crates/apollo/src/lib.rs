//! REST client for the Apollo.io sales-intelligence API.
//!
//! [`ApolloClient`] wraps the Apollo endpoints the gateway uses (people
//! and organization search, contact enrichment, email sequences, deals)
//! behind local rate limiting, a bounded 429 retry loop, an in-flight
//! request cap, and an optional read-through response cache.

mod client;
mod error;
mod types;

pub use client::{ApolloClient, ApolloConfig, MAX_INFLIGHT_REQUESTS};
pub use error::ApolloError;
pub use types::*;
