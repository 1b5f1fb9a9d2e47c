//! Object storage port for uploaded media.

use async_trait::async_trait;

/// Object store - where uploaded media bytes land.
///
/// The platform only needs write-and-forget: objects are served back through
/// a public base URL by whatever bucket/CDN sits behind the implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under `key` with the given content type.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ObjectError>;
}

/// Object store errors.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("Upload failed: {0}")]
    Upload(String),
}
