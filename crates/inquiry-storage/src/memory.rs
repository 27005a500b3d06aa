use crate::traits::{KvStore, StoreError, StoreResult};
use crate::StoreBackend;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
enum Slot {
    Text(String),
    List(VecDeque<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    slot: Slot,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Process-local store
///
/// Used for development and tests. Expired keys are dropped lazily when they
/// are next touched. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    /// Live keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|(_, e)| !e.is_expired(now))
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Remaining time to live of a key, if it has one
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| !e.is_expired(now))
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }
}

/// Resolve Redis-style list indices against a list of `len` elements
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            return Ok(None);
        }

        match entries.get(key) {
            Some(Entry {
                slot: Slot::Text(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(StoreError::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> StoreResult<()> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                slot: Slot::Text(value),
                expires_at,
            },
        );
        Ok(())
    }

    async fn lpush(&self, key: &str, value: &str) -> StoreResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            slot: Slot::List(VecDeque::new()),
            expires_at: None,
        });

        match &mut entry.slot {
            Slot::List(list) => {
                list.push_front(value.to_string());
                Ok(list.len() as u64)
            }
            Slot::Text(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(entry) if entry.is_expired(now) => Ok(Vec::new()),
            Some(Entry {
                slot: Slot::List(list),
                ..
            }) => Ok(match resolve_range(list.len(), start, stop) {
                Some((from, to)) => list.range(from..=to).cloned().collect(),
                None => Vec::new(),
            }),
            Some(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
