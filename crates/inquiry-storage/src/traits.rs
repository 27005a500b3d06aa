//! Key-value store abstraction trait
//!
//! The contact pipeline only needs a handful of primitives from its store:
//! string get/set with an optional expiry, list prepend and range reads.
//! Values are JSON documents serialized by the caller.

use crate::StoreBackend;
use async_trait::async_trait;
use inquiry_core::AppError;
use std::time::Duration;
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Wrong value type at key: {0}")]
    WrongType(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => AppError::Serialization(e),
            other => AppError::Store(other.to_string()),
        }
    }
}

/// Key-value store trait
///
/// All backends (in-memory, Redis, Upstash REST) implement this trait so the
/// gateway never couples to a specific client.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a string value; `None` when the key is missing or expired
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a string value, replacing any previous value and expiry
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> StoreResult<()>;

    /// Prepend to a list, creating it when missing. Returns the new length.
    async fn lpush(&self, key: &str, value: &str) -> StoreResult<u64>;

    /// Read list elements `start..=stop` with Redis index semantics
    /// (negative indices count from the end)
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>>;

    /// Check the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Get the store backend type
    fn backend_type(&self) -> StoreBackend;
}
