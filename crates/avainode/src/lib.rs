//! REST client for the Avainode charter marketplace API.
//!
//! [`AvainodeClient`] wraps the Avainode HTTP endpoints (aircraft search,
//! pricing quotes, bookings, fleet, empty legs) behind local rate limiting,
//! a bounded 429 retry loop, and an optional read-through response cache.

mod client;
mod error;
mod types;

pub use client::{AvainodeClient, AvainodeConfig};
pub use error::AvainodeError;
pub use types::*;
