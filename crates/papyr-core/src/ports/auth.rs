//! Authentication and authorization ports.

/// Capability proving that a mutating call is made on behalf of a validated
/// session.
///
/// Produced by the session layer after a token lookup; every write operation
/// on the content store takes one as an explicit argument, so authorization
/// is never inferred from ambient request state inside the store.
#[derive(Debug, Clone)]
pub struct WriteAccess {
    token: String,
}

impl WriteAccess {
    /// Wrap a validated session token.
    pub fn for_session(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The session token this capability was derived from.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing session")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
