//! Inquiry Storage Library
//!
//! Key-value store abstraction, its backends, and the persistence gateway
//! the contact pipeline writes through.
//!
//! # Key layout
//!
//! - `contact:{id}`: the stored submission (JSON)
//! - `contact_submissions`: list of submission ids, newest first
//! - `analytics:{event}:{YYYY-MM-DD}`: daily counter, expires after 90 days
//! - `error:{epoch_millis}`: error log entry, expires after 7 days
//!
//! Key generation is centralized in the `keys` module so every backend and
//! tool reads the same layout.

pub mod factory;
pub mod gateway;
pub mod keys;
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis_store;
pub mod traits;
#[cfg(feature = "store-upstash")]
pub mod upstash;

// Re-export commonly used types
pub use factory::create_store;
pub use gateway::{Bookkeeping, SubmissionGateway};
pub use inquiry_core::StoreBackend;
pub use memory::MemoryStore;
#[cfg(feature = "store-redis")]
pub use redis_store::RedisStore;
pub use traits::{KvStore, StoreError, StoreResult};
#[cfg(feature = "store-upstash")]
pub use upstash::UpstashStore;
