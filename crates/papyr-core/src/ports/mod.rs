//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod kv;
mod object_store;

pub use auth::{AuthError, PasswordService, WriteAccess};
pub use kv::{KvError, KvStore};
pub use object_store::{ObjectError, ObjectStore};
