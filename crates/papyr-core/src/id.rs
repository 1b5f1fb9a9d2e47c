//! Identifier and slug generation.
//!
//! Ids are opaque strings: a millisecond-timestamp base36 prefix (so ids sort
//! roughly by creation time) followed by random entropy. Collision resistance
//! is probabilistic - there is no coordination between callers and no
//! detection of the (vanishingly unlikely) collision.

use chrono::Utc;
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix appended to the timestamp prefix.
const ENTROPY_LEN: usize = 10;

/// Generate a new globally-unique post identifier.
pub fn new_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let entropy = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &entropy[..ENTROPY_LEN])
}

/// Generate a fallback slug for a post created without one.
///
/// Timestamp-only, like the identifiers but without entropy: slugs are meant
/// to be short and human-pasteable, and two posts created in the same
/// millisecond by the same author is not a case worth defending against.
pub fn new_slug() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    to_base36(millis)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn base36_round_trip() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn ids_are_unique_across_many_calls() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn ids_sort_roughly_by_creation_time() {
        let a = new_id();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = new_id();
        // Same-length timestamp prefixes compare lexicographically.
        assert!(a[..8] <= b[..8]);
    }
}
