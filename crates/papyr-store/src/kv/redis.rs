//! Redis KV implementation with connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};

use papyr_core::ports::{KvError, KvStore};

/// Atomic compare-and-swap on a single key.
///
/// ARGV[1] is "1" when the caller expects the key to be absent, ARGV[2] the
/// expected current value otherwise, ARGV[3] the replacement.
const CAS_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if ARGV[1] == '1' then
    if current then return 0 end
else
    if current ~= ARGV[2] then return 0 end
end
redis.call('SET', KEYS[1], ARGV[3])
return 1
"#;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed KV store.
///
/// Uses connection manager for automatic reconnection and pooling; the CAS
/// operation runs as a Lua script so the compare and the write execute
/// atomically on the server.
pub struct RedisKv {
    conn: ConnectionManager,
    cas: Script,
}

impl RedisKv {
    pub async fn new(config: RedisConfig) -> Result<Self, KvError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| KvError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| KvError::Connection("Connection timed out".to_string()))?
            .map_err(|e| KvError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis KV backend");

        Ok(Self {
            conn,
            cas: Script::new(CAS_SCRIPT),
        })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, KvError> {
        Self::new(RedisConfig::from_env()).await
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| KvError::Operation(e.to_string()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                conn.set_ex::<_, _, ()>(key, value, duration.as_secs())
                    .await
                    .map_err(|e| KvError::Operation(e.to_string()))?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| KvError::Operation(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| KvError::Operation(e.to_string()))?;
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        let expect_absent = if expected.is_none() { "1" } else { "0" };

        let swapped: i64 = self
            .cas
            .key(key)
            .arg(expect_absent)
            .arg(expected.unwrap_or(""))
            .arg(value)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| KvError::Operation(e.to_string()))?;

        Ok(swapped == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_kv() -> Option<RedisKv> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisKv::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_put_get_delete() {
        let kv = match get_test_kv().await {
            Some(kv) => kv,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let key = "papyr_test_key";
        kv.put(key, "value", None).await.unwrap();
        assert_eq!(kv.get(key).await.unwrap(), Some("value".to_string()));

        kv.delete(key).await.unwrap();
        assert_eq!(kv.get(key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_cas() {
        let kv = match get_test_kv().await {
            Some(kv) => kv,
            None => return,
        };

        let key = "papyr_test_cas_key";
        kv.delete(key).await.unwrap();

        assert!(kv.compare_and_swap(key, None, "a").await.unwrap());
        assert!(!kv.compare_and_swap(key, None, "b").await.unwrap());
        assert!(kv.compare_and_swap(key, Some("a"), "b").await.unwrap());
        assert_eq!(kv.get(key).await.unwrap(), Some("b".to_string()));

        kv.delete(key).await.unwrap();
    }
}
