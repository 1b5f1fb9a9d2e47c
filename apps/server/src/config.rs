//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Redis connection URL; `None` means in-memory backends.
    pub redis_url: Option<String>,
    /// Argon2 PHC hash of the admin password. Login is disabled until set.
    pub admin_password_hash: Option<String>,
    /// Site name used in the feed.
    pub site_name: String,
    /// Public base URL prepended to uploaded object keys.
    pub media_public_base: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            redis_url: env::var("REDIS_URL").ok(),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").ok(),
            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Papyr".to_string()),
            media_public_base: env::var("MEDIA_PUBLIC_BASE")
                .unwrap_or_else(|_| "/media".to_string()),
        }
    }
}
