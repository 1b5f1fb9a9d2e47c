//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to login to the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response reporting whether the current session is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
}

/// Generic acknowledgement for mutations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Pagination query parameters for the post listing.
///
/// Deserialized leniently as raw strings: absent or non-numeric values fall
/// back to defaults here, non-positive ones are clamped by the store.
/// Malformed pagination must never reject the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    page: Option<String>,
    limit: Option<String>,
    /// Unfiltered admin view, requires an authenticated session.
    #[serde(default)]
    pub all: bool,
}

impl ListPostsQuery {
    pub fn page(&self) -> i64 {
        parse_or(&self.page, 1)
    }

    pub fn limit(&self) -> i64 {
        parse_or(&self.limit, 10)
    }
}

fn parse_or(raw: &Option<String>, default: i64) -> i64 {
    raw.as_deref().and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Keyword search query.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Upload query parameters: the original filename, for its extension.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// Response to a successful media upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_parses_leniently() {
        let query: ListPostsQuery =
            serde_json::from_str(r#"{"page":"3","limit":"25"}"#).unwrap();
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 25);
        assert!(!query.all);
    }

    #[test]
    fn malformed_pagination_falls_back_to_defaults() {
        let query: ListPostsQuery =
            serde_json::from_str(r#"{"page":"abc","limit":""}"#).unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn absent_pagination_uses_defaults() {
        let query: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
    }
}

