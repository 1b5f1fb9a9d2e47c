//! Friend-link directory - a read-mostly list replaced as a whole on edit.

use std::sync::Arc;

use papyr_core::domain::FriendLink;
use papyr_core::ports::{KvError, KvStore, WriteAccess};

use crate::keys;

/// The `links:friend` list. Entries are not individually addressable.
#[derive(Clone)]
pub struct FriendLinks {
    kv: Arc<dyn KvStore>,
}

impl FriendLinks {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// The whole directory; absent reads as empty.
    pub async fn list(&self) -> Result<Vec<FriendLink>, KvError> {
        match self.kv.get(keys::FRIEND_LINKS).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole directory.
    pub async fn replace(
        &self,
        links: &[FriendLink],
        _access: &WriteAccess,
    ) -> Result<(), KvError> {
        let json = serde_json::to_string(links)?;
        self.kv.put(keys::FRIEND_LINKS, &json, None).await
    }
}
