//! Domain-level error types.

use thiserror::Error;

use crate::ports::KvError;

/// Errors surfaced by the content store facade.
///
/// Absence of a record is never an error here: lookups return `Option` and
/// deletes return `bool`, per the tombstone-tolerant reads the store makes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] KvError),
}
