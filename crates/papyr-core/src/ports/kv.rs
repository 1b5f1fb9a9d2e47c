use async_trait::async_trait;
use std::time::Duration;

/// Key-value backend port - abstraction over the durable store (Redis,
/// in-memory).
///
/// The backend offers no multi-key transactions and no ordering across
/// concurrent writers beyond last-writer-wins per key. The one concession to
/// the index's read-modify-write cycles is [`compare_and_swap`], which every
/// implementation must provide atomically for a single key.
///
/// [`compare_and_swap`]: KvStore::compare_and_swap
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a value. Absence is a normal `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Unconditionally set a value, with optional expiry.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError>;

    /// Delete a key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Atomically replace `key` with `value` if its current value equals
    /// `expected` (`None` = key must be absent). Returns `false` when the
    /// comparison failed and nothing was written.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, KvError>;
}

/// Backend operation errors.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Write contention on key {0}")]
    Conflict(String),
}

impl From<serde_json::Error> for KvError {
    fn from(err: serde_json::Error) -> Self {
        KvError::Serialization(err.to_string())
    }
}
