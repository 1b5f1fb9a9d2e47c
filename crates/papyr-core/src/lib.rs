//! # Papyr Core
//!
//! The domain layer of the Papyr publishing platform.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod id;
pub mod ports;

pub use error::StoreError;
