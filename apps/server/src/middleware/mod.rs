//! Request middleware: session auth extractor and error responses.

pub mod auth;
pub mod error;
