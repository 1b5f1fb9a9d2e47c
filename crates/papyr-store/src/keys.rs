//! Key namespace of the KV backend.

/// The single newest-first list of post ids.
pub const TIME_INDEX: &str = "idx:post:time";

/// The whole-list friend-link directory.
pub const FRIEND_LINKS: &str = "links:friend";

/// Primary post record, camelCase JSON.
pub fn post_record(id: &str) -> String {
    format!("post:id:{id}")
}

/// Slug index entry, value is the bare id string.
pub fn slug_entry(slug: &str) -> String {
    format!("post:slug:{slug}")
}

/// Session existence marker, expiry enforced by the backend.
pub fn session(token: &str) -> String {
    format!("session:{token}")
}
