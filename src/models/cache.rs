use crate::error::StorageError;
use crate::models::feed::FeedResponse;
use crate::models::storage::KeyValueStore;
use crate::utils::clock::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// What is stored under each feed key: the proxy response and when it
/// was written, in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: FeedResponse,
    pub timestamp: i64,
}

/// Best-effort TTL cache for feed responses over a session-scoped store.
///
/// One entry per key. Expired entries are removed lazily, when a read
/// notices them.
#[derive(Clone)]
pub struct FeedCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    /// Read a live entry. Expired entries are deleted and reported absent.
    pub fn lookup(&self, key: &str) -> Result<Option<FeedResponse>, StorageError> {
        let raw = match self.store.get_item(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let entry: CacheEntry = serde_json::from_str(&raw)?;
        let age = self.clock.now_millis() - entry.timestamp;
        if age > self.ttl.as_millis() as i64 {
            debug!("Cache entry for {} expired ({} ms old)", key, age);
            self.store.remove_item(key)?;
            return Ok(None);
        }

        Ok(Some(entry.data))
    }

    /// Like [`lookup`](Self::lookup), but a storage failure is logged and
    /// treated as a miss.
    pub fn get(&self, key: &str) -> Option<FeedResponse> {
        match self.lookup(key) {
            Ok(found) => found,
            Err(e) => {
                error!("Error reading cache for {}: {}", key, e);
                None
            }
        }
    }

    pub fn put(&self, key: &str, data: &FeedResponse) -> Result<(), StorageError> {
        let entry = CacheEntry {
            data: data.clone(),
            timestamp: self.clock.now_millis(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.store.set_item(key, &raw)
    }
}
