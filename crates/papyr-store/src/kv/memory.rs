//! In-memory KV implementation - used as fallback when Redis is unavailable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use papyr_core::ports::{KvError, KvStore};

struct KvEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory KV store using a simple HashMap with async RwLock.
///
/// This is the fallback implementation when Redis is not available and the
/// backend used by the test suites. Note: data is lost on process restart.
pub struct InMemoryKv {
    store: RwLock<HashMap<String, KvEntry>>,
}

impl InMemoryKv {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &KvEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }

    fn live_value(entry: Option<&KvEntry>) -> Option<&str> {
        entry
            .filter(|e| !Self::is_expired(e))
            .map(|e| e.value.as_str())
    }
}

impl Default for InMemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for InMemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let store = self.store.read().await;
        let Some(entry) = store.get(key) else {
            return Ok(None);
        };

        if Self::is_expired(entry) {
            drop(store);
            // Clean up expired entry with write lock
            let mut store = self.store.write().await;
            store.remove(key);
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError> {
        let mut store = self.store.write().await;

        let expires_at = ttl.map(|d| Instant::now() + d);

        store.insert(
            key.to_string(),
            KvEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, KvError> {
        // Comparison and write under one write guard makes this atomic with
        // respect to every other operation on the map.
        let mut store = self.store.write().await;

        if Self::live_value(store.get(key)) != expected {
            return Ok(false);
        }

        store.insert(
            key.to_string(),
            KvEntry {
                value: value.to_string(),
                expires_at: None,
            },
        );

        Ok(true)
    }
}
