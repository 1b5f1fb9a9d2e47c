//! Slug Index - one KV entry per slug, mapping slug to post id.

use std::sync::Arc;

use papyr_core::ports::{KvError, KvStore};

use crate::keys;

/// Slug-to-id mapping at `post:slug:{slug}`.
///
/// No uniqueness enforcement beyond last-bind-wins: two posts bound to the
/// same slug concurrently means one silently loses its public URL.
#[derive(Clone)]
pub struct SlugIndex {
    kv: Arc<dyn KvStore>,
}

impl SlugIndex {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Unconditionally bind `slug` to `id`.
    pub async fn bind(&self, slug: &str, id: &str) -> Result<(), KvError> {
        self.kv.put(&keys::slug_entry(slug), id, None).await
    }

    /// Resolve a slug to its id, if bound.
    pub async fn resolve(&self, slug: &str) -> Result<Option<String>, KvError> {
        self.kv.get(&keys::slug_entry(slug)).await
    }

    /// Remove a slug mapping. Unbinding an absent slug is a no-op.
    pub async fn unbind(&self, slug: &str) -> Result<(), KvError> {
        self.kv.delete(&keys::slug_entry(slug)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKv;

    #[tokio::test]
    async fn bind_resolve_unbind() {
        let slugs = SlugIndex::new(Arc::new(InMemoryKv::new()));

        slugs.bind("hello-world", "p1").await.unwrap();
        assert_eq!(
            slugs.resolve("hello-world").await.unwrap(),
            Some("p1".to_string())
        );

        slugs.unbind("hello-world").await.unwrap();
        assert_eq!(slugs.resolve("hello-world").await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_bind_wins() {
        let slugs = SlugIndex::new(Arc::new(InMemoryKv::new()));

        slugs.bind("s", "p1").await.unwrap();
        slugs.bind("s", "p2").await.unwrap();
        assert_eq!(slugs.resolve("s").await.unwrap(), Some("p2".to_string()));
    }
}
