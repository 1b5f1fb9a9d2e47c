//! Time Index - the single newest-first list of post ids.
//!
//! The index is one KV value, so every mutation is a read-modify-write over
//! the whole list. With a plain last-writer-wins backend two concurrent
//! mutations can silently lose one update; here the write goes through
//! [`KvStore::compare_and_swap`] inside a bounded retry loop, so concurrent
//! prepends and removes all survive. A reader that sees an id whose record is
//! gone treats it as a tombstone, never an error.

use std::sync::Arc;

use papyr_core::ports::{KvError, KvStore};

use crate::keys;

/// Attempts before a contended index write gives up with [`KvError::Conflict`].
const MAX_CAS_ATTEMPTS: usize = 8;

/// Ordered list of post identifiers, newest first, at `idx:post:time`.
#[derive(Clone)]
pub struct TimeIndex {
    kv: Arc<dyn KvStore>,
}

impl TimeIndex {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// The full id sequence, newest first. Absent index reads as empty.
    pub async fn ids(&self) -> Result<Vec<String>, KvError> {
        match self.kv.get(keys::TIME_INDEX).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Insert `id` at the front unless it is already present.
    pub async fn prepend(&self, id: &str) -> Result<(), KvError> {
        for _ in 0..MAX_CAS_ATTEMPTS {
            let raw = self.kv.get(keys::TIME_INDEX).await?;
            let mut ids: Vec<String> = match raw.as_deref() {
                Some(json) => serde_json::from_str(json)?,
                None => Vec::new(),
            };

            if ids.iter().any(|existing| existing == id) {
                return Ok(());
            }
            ids.insert(0, id.to_string());

            let next = serde_json::to_string(&ids)?;
            if self
                .kv
                .compare_and_swap(keys::TIME_INDEX, raw.as_deref(), &next)
                .await?
            {
                return Ok(());
            }
            tracing::debug!(id, "time index prepend lost CAS race, retrying");
        }

        Err(KvError::Conflict(keys::TIME_INDEX.to_string()))
    }

    /// Remove `id` from the sequence. Removing an absent id is a no-op.
    pub async fn remove(&self, id: &str) -> Result<(), KvError> {
        for _ in 0..MAX_CAS_ATTEMPTS {
            let raw = self.kv.get(keys::TIME_INDEX).await?;
            let Some(json) = raw.as_deref() else {
                return Ok(());
            };

            let ids: Vec<String> = serde_json::from_str(json)?;
            if !ids.iter().any(|existing| existing == id) {
                return Ok(());
            }
            let remaining: Vec<&String> = ids.iter().filter(|existing| *existing != id).collect();

            let next = serde_json::to_string(&remaining)?;
            if self
                .kv
                .compare_and_swap(keys::TIME_INDEX, raw.as_deref(), &next)
                .await?
            {
                return Ok(());
            }
            tracing::debug!(id, "time index remove lost CAS race, retrying");
        }

        Err(KvError::Conflict(keys::TIME_INDEX.to_string()))
    }

    /// Pure read of a window of the sequence, clamped to `[0, len]`.
    /// Out-of-range requests return the empty sequence.
    pub async fn slice(&self, offset: usize, count: usize) -> Result<Vec<String>, KvError> {
        let ids = self.ids().await?;
        let start = offset.min(ids.len());
        let end = start.saturating_add(count).min(ids.len());
        Ok(ids[start..end].to_vec())
    }

    /// Number of ids in the index, including any tombstoned entries.
    pub async fn len(&self) -> Result<usize, KvError> {
        Ok(self.ids().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, KvError> {
        Ok(self.len().await? == 0)
    }
}
