//! Session Store - ephemeral existence markers with backend-enforced expiry.

use std::sync::Arc;
use std::time::Duration;

use papyr_core::id;
use papyr_core::ports::{KvError, KvStore, WriteAccess};

use crate::keys;

/// How long an issued session stays valid.
pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// The constant value stored under a session key; the payload is the key's
/// existence, nothing else.
const SESSION_MARKER: &str = "valid";

/// Sessions at `session:{token}`. A token is opaque; validating one yields
/// the [`WriteAccess`] capability the content store requires for mutations.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Mint a fresh session token with the standard TTL.
    pub async fn issue(&self) -> Result<String, KvError> {
        let token = id::new_id();
        self.kv
            .put(&keys::session(&token), SESSION_MARKER, Some(SESSION_TTL))
            .await?;
        tracing::info!("issued session");
        Ok(token)
    }

    /// Check a token; a live one becomes a write capability.
    pub async fn validate(&self, token: &str) -> Result<Option<WriteAccess>, KvError> {
        Ok(self
            .kv
            .get(&keys::session(token))
            .await?
            .map(|_| WriteAccess::for_session(token)))
    }

    /// Drop a session. Revoking an unknown token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), KvError> {
        self.kv.delete(&keys::session(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKv;

    fn sessions() -> SessionStore {
        SessionStore::new(Arc::new(InMemoryKv::new()))
    }

    #[tokio::test]
    async fn issued_token_validates() {
        let store = sessions();
        let token = store.issue().await.unwrap();

        let access = store.validate(&token).await.unwrap().unwrap();
        assert_eq!(access.token(), token);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let store = sessions();
        assert!(store.validate("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoked_token_no_longer_validates() {
        let store = sessions();
        let token = store.issue().await.unwrap();

        store.revoke(&token).await.unwrap();
        assert!(store.validate(&token).await.unwrap().is_none());

        // Revoking again is harmless.
        store.revoke(&token).await.unwrap();
    }
}
