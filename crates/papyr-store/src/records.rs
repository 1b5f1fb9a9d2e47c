//! Post Record Store - the canonical representation of a post.

use std::sync::Arc;

use papyr_core::domain::Post;
use papyr_core::ports::{KvError, KvStore};

use crate::keys;

/// Owns the primary post records at `post:id:{id}`.
///
/// Writes are unconditional overwrites (last writer wins); a missing record
/// on read is the normal tombstone case, not an error.
#[derive(Clone)]
pub struct PostRecords {
    kv: Arc<dyn KvStore>,
}

impl PostRecords {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Unconditional overwrite at key `id`.
    pub async fn put(&self, post: &Post) -> Result<(), KvError> {
        let json = serde_json::to_string(post)?;
        self.kv.put(&keys::post_record(&post.id), &json, None).await
    }

    /// Fetch a record; `Ok(None)` when the id has no record.
    pub async fn get(&self, id: &str) -> Result<Option<Post>, KvError> {
        match self.kv.get(&keys::post_record(id)).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Remove the record. Deleting an absent id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<(), KvError> {
        self.kv.delete(&keys::post_record(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKv;
    use papyr_core::domain::PostDraft;

    fn store() -> PostRecords {
        PostRecords::new(Arc::new(InMemoryKv::new()))
    }

    fn sample(id: &str) -> Post {
        PostDraft {
            title: "title".into(),
            content: "content".into(),
            ..PostDraft::default()
        }
        .into_post(id.into(), format!("{id}-slug"), 1000)
    }

    #[tokio::test]
    async fn put_get_round_trip() {
        let records = store();
        records.put(&sample("p1")).await.unwrap();

        let loaded = records.get("p1").await.unwrap().unwrap();
        assert_eq!(loaded.id, "p1");
        assert_eq!(loaded.title, "title");
    }

    #[tokio::test]
    async fn absent_id_is_none_not_error() {
        assert!(store().get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let records = store();
        records.put(&sample("p1")).await.unwrap();
        records.delete("p1").await.unwrap();
        records.delete("p1").await.unwrap();
        assert!(records.get("p1").await.unwrap().is_none());
    }
}
