//! Key-value caching layer for the JetVision gateway.
//!
//! Two backends behind one [`StateStore`] trait: Redis (production) and an
//! in-memory map (tests, or when no `REDIS_URL` is configured). On top of
//! the store sit the two consumers the gateway needs:
//!
//! - [`ResponseCache`]: read-through cache for vendor GET/search responses
//!   (3-minute TTL, keyed by endpoint + parameter fingerprint).
//! - [`SessionStore`]: per-session request metadata (1-hour TTL).
//!
//! The store is a cache, never a system of record -- every consumer treats
//! store failures as misses.

mod error;
mod redis_store;
mod response_cache;
mod session;
mod store;

pub use error::CacheError;
pub use redis_store::RedisStore;
pub use response_cache::{ResponseCache, RESPONSE_TTL_SECS};
pub use session::{SessionRecord, SessionStore, SESSION_TTL_SECS};
pub use store::{MemoryStore, StateStore, StoreBackend};
