//! Store doubles for failure paths.

use async_trait::async_trait;
use inquiry_storage::{KvStore, MemoryStore, StoreBackend, StoreError, StoreResult};
use std::time::Duration;

/// Which writes the store refuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Every operation, including ping
    Everything,
    /// Only the submission index; plain values are still written
    Index,
    /// Only analytics counters; submissions and the index are written
    Analytics,
}

/// Memory store that fails selected operations with a connection error
#[derive(Clone)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: FailOn,
}

impl FailingStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on,
        }
    }

    /// The backing memory store, for inspecting what did get written
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    fn refuse(&self, key: &str) -> StoreResult<()> {
        match self.fail_on {
            FailOn::Everything => Err(unreachable_store()),
            FailOn::Index => Ok(()),
            FailOn::Analytics if key.starts_with("analytics:") => Err(unreachable_store()),
            FailOn::Analytics => Ok(()),
        }
    }
}

fn unreachable_store() -> StoreError {
    StoreError::Connection("10.0.0.3:6379: connection refused".to_string())
}

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.refuse(key)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> StoreResult<()> {
        self.refuse(key)?;
        self.inner.set(key, value, ttl).await
    }

    async fn lpush(&self, key: &str, value: &str) -> StoreResult<u64> {
        match self.fail_on {
            FailOn::Analytics => self.inner.lpush(key, value).await,
            FailOn::Everything | FailOn::Index => Err(unreachable_store()),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        self.refuse(key)?;
        self.inner.lrange(key, start, stop).await
    }

    async fn ping(&self) -> StoreResult<()> {
        match self.fail_on {
            FailOn::Everything => Err(unreachable_store()),
            FailOn::Index | FailOn::Analytics => Ok(()),
        }
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
