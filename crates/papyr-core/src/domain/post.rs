use serde::{Deserialize, Serialize};

/// Number of characters of `content` used for a derived excerpt.
pub const EXCERPT_LEN: usize = 200;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

/// Post entity - the canonical content unit.
///
/// Stored as camelCase JSON at `post:id:{id}`. The `id` is assigned once and
/// never changes; `created_at` is pinned on first write; everything else is
/// replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub views: u64,
    /// Millisecond timestamps.
    pub created_at: i64,
    pub updated_at: i64,
}

impl Post {
    /// Whether `content` is raw HTML rather than markdown.
    ///
    /// Same heuristic as the renderer: a leading angle bracket means the
    /// author pasted HTML directly.
    pub fn content_is_html(&self) -> bool {
        self.content.trim_start().starts_with('<')
    }
}

/// Input for create/update operations.
///
/// Every field the store can default is optional; `None` means "not supplied"
/// and is distinct from an explicitly empty value, which is kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover: Option<String>,
    pub status: Option<PostStatus>,
    pub pinned: Option<bool>,
    pub views: Option<u64>,
    pub created_at: Option<i64>,
}

impl PostDraft {
    /// Resolve the draft into a full record, applying defaults for absent
    /// fields. Pure; identity and timestamps are decided by the caller.
    pub fn into_post(self, id: String, slug: String, now: i64) -> Post {
        let excerpt = self
            .excerpt
            .unwrap_or_else(|| derive_excerpt(&self.content));

        Post {
            id,
            slug,
            title: self.title,
            excerpt,
            content: self.content,
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            cover: self.cover,
            status: self.status.unwrap_or(PostStatus::Published),
            pinned: self.pinned.unwrap_or(false),
            views: self.views.unwrap_or(0),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

/// First [`EXCERPT_LEN`] characters of the content, char-boundary safe.
fn derive_excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_LEN).collect()
}
