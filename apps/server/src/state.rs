//! Application state - shared across all handlers.

use std::sync::Arc;

use papyr_core::ports::{KvStore, ObjectStore, PasswordService};
use papyr_store::{
    Argon2PasswordService, ContentStore, FriendLinks, InMemoryKv, InMemoryObjectStore,
    RedisConfig, RedisKv, SessionStore,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentStore,
    pub sessions: SessionStore,
    pub links: FriendLinks,
    pub objects: Arc<dyn ObjectStore>,
    pub passwords: Arc<dyn PasswordService>,
    pub admin_password_hash: Option<String>,
    pub site_name: String,
    pub media_public_base: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let kv: Arc<dyn KvStore> = match &config.redis_url {
            Some(url) => {
                let redis_config = RedisConfig {
                    url: url.clone(),
                    ..RedisConfig::default()
                };
                match RedisKv::new(redis_config).await {
                    Ok(kv) => Arc::new(kv),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to Redis: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryKv::new())
                    }
                }
            }
            None => {
                tracing::warn!("REDIS_URL not set. Running with in-memory KV (non-durable).");
                Arc::new(InMemoryKv::new())
            }
        };

        if config.admin_password_hash.is_none() {
            tracing::warn!("ADMIN_PASSWORD_HASH not set. Admin login is disabled.");
        }

        tracing::info!("Application state initialized");

        Self {
            content: ContentStore::new(kv.clone()),
            sessions: SessionStore::new(kv.clone()),
            links: FriendLinks::new(kv),
            objects: Arc::new(InMemoryObjectStore::new()),
            passwords: Arc::new(Argon2PasswordService::new()),
            admin_password_hash: config.admin_password_hash.clone(),
            site_name: config.site_name.clone(),
            media_public_base: config.media_public_base.clone(),
        }
    }
}
