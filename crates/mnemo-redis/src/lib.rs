//! Redis-backed session storage for Mnemo.
//!
//! [`RedisSessionStore`] implements the [`SessionStore`](mnemo_core::SessionStore)
//! trait on top of one Redis list per session, with a rolling TTL refreshed
//! on every append.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use mnemo_redis::{RedisSessionStore, RedisSessionStoreConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Default 1-hour TTL
//! let store = RedisSessionStore::from_url("redis://127.0.0.1/")?;
//!
//! // Custom TTL
//! let config = RedisSessionStoreConfig { ttl_seconds: 120, ..Default::default() };
//! let store = RedisSessionStore::from_url_with_config("redis://127.0.0.1/", config)?;
//! # Ok(())
//! # }
//! ```

mod store;

pub use store::{RedisSessionStore, RedisSessionStoreConfig};

// Re-export core types for convenience.
pub use mnemo_core::{Message, Role, SessionStore};
