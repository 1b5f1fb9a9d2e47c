//! # Papyr Store
//!
//! Concrete implementations of the ports defined in `papyr-core`, plus the
//! content store itself: the post record store, slug index, time index, and
//! the facade that keeps the three mutually consistent over a backend with
//! no transactions.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `auth` - Argon2 password hashing
//! - `redis` - Redis KV backend

pub mod content;
pub mod keys;
pub mod kv;
pub mod links;
pub mod objects;
pub mod records;
pub mod sessions;
pub mod slugs;
pub mod timeline;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use content::{ContentStore, ListQuery, PostPage};
pub use kv::InMemoryKv;
pub use links::FriendLinks;
pub use objects::InMemoryObjectStore;
pub use records::PostRecords;
pub use sessions::SessionStore;
pub use slugs::SlugIndex;
pub use timeline::TimeIndex;

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use kv::{RedisConfig, RedisKv};
