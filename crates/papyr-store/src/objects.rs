//! In-memory object store - stand-in for a real media bucket in development
//! and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use papyr_core::ports::{ObjectError, ObjectStore};

struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Keeps uploaded objects in a map. Data is lost on restart; production
/// deployments point the port at an actual bucket behind a public base URL.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Test hook: size of a stored object, if present.
    pub async fn size_of(&self, key: &str) -> Option<usize> {
        self.objects.read().await.get(key).map(|o| o.bytes.len())
    }

    /// Test hook: content type recorded for a stored object.
    pub async fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ObjectError> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
