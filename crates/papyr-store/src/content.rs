//! Content Store facade - composes the post record store, slug index, and
//! time index into create/read/update/delete/list operations.
//!
//! Ordering of partial writes matters: the record is always written before
//! the slug binding and the index entry, so a crash mid-sequence leaves at
//! worst an unreachable-by-slug, unindexed-but-existent record (recoverable
//! by direct id lookup), never a dangling pointer at nothing. There is no
//! compensating rollback.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;

use papyr_core::StoreError;
use papyr_core::domain::{Post, PostDraft, PostStatus};
use papyr_core::id;
use papyr_core::ports::{KvStore, WriteAccess};

use crate::records::PostRecords;
use crate::slugs::SlugIndex;
use crate::timeline::TimeIndex;

/// Page size used when the caller supplies none or a non-positive one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How many recent published posts a keyword scan covers.
const SEARCH_WINDOW: usize = 100;

/// Pagination parameters as they arrive from the outside world.
///
/// Signed on purpose: malformed values are clamped here, never rejected.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery {
    pub page: i64,
    pub page_size: i64,
    pub include_drafts: bool,
}

/// One page of posts plus renderable totals.
///
/// `total`/`total_pages` count posts that survive tombstone and draft
/// filtering, not the raw index length.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: usize,
    pub total_pages: usize,
}

/// The component application code calls into for all content access.
#[derive(Clone)]
pub struct ContentStore {
    records: PostRecords,
    slugs: SlugIndex,
    timeline: TimeIndex,
}

impl ContentStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            records: PostRecords::new(kv.clone()),
            slugs: SlugIndex::new(kv.clone()),
            timeline: TimeIndex::new(kv),
        }
    }

    /// Create a post: assign identity, slug, timestamps and defaults, then
    /// write record, slug binding, and index entry in that order.
    pub async fn create(
        &self,
        draft: PostDraft,
        _access: &WriteAccess,
    ) -> Result<Post, StoreError> {
        validate(&draft)?;

        let post_id = draft.id.clone().unwrap_or_else(id::new_id);
        let slug = draft.slug.clone().unwrap_or_else(id::new_slug);
        let post = draft.into_post(post_id, slug, Utc::now().timestamp_millis());

        self.records.put(&post).await?;
        self.slugs.bind(&post.slug, &post.id).await?;
        self.timeline.prepend(&post.id).await?;

        tracing::info!(id = %post.id, slug = %post.slug, "created post");
        Ok(post)
    }

    /// Replace a post wholesale, keeping its identity and `created_at`.
    ///
    /// The time index is not touched for an existing post: position is by
    /// identity, not recency of edit. A changed slug binds the new mapping
    /// and leaves the old one in place; it keeps resolving to this id.
    /// Updating an id with no record behaves like a keyed create, which also
    /// recovers records stranded by a crash between write and index prepend.
    pub async fn update(
        &self,
        post_id: &str,
        mut draft: PostDraft,
        _access: &WriteAccess,
    ) -> Result<Post, StoreError> {
        validate(&draft)?;

        let previous = self.records.get(post_id).await?;
        let slug = match (draft.slug.take(), previous.as_ref()) {
            (Some(slug), _) => slug,
            (None, Some(prev)) => prev.slug.clone(),
            (None, None) => id::new_slug(),
        };

        let mut post = draft.into_post(post_id.to_string(), slug, Utc::now().timestamp_millis());
        if let Some(prev) = &previous {
            post.created_at = prev.created_at;
        }

        self.records.put(&post).await?;

        let slug_is_new = previous
            .as_ref()
            .map(|prev| prev.slug != post.slug)
            .unwrap_or(true);
        if slug_is_new {
            self.slugs.bind(&post.slug, &post.id).await?;
        }
        if previous.is_none() {
            self.timeline.prepend(&post.id).await?;
        }

        tracing::info!(id = %post.id, "updated post");
        Ok(post)
    }

    /// Remove record, slug binding, and index entry. Returns `false` when no
    /// record exists - idempotent no-op semantics, not an error.
    pub async fn delete(&self, post_id: &str, _access: &WriteAccess) -> Result<bool, StoreError> {
        let Some(post) = self.records.get(post_id).await? else {
            return Ok(false);
        };

        self.records.delete(post_id).await?;
        self.slugs.unbind(&post.slug).await?;
        self.timeline.remove(post_id).await?;

        tracing::info!(id = %post_id, "deleted post");
        Ok(true)
    }

    /// Dual-mode lookup: slug resolution first, then the input as a raw id.
    /// A slug colliding with a raw id string resolves in favor of the slug.
    pub async fn get(&self, slug_or_id: &str) -> Result<Option<Post>, StoreError> {
        if let Some(post_id) = self.slugs.resolve(slug_or_id).await? {
            return Ok(self.records.get(&post_id).await?);
        }
        Ok(self.records.get(slug_or_id).await?)
    }

    /// Paginated, newest-first listing.
    ///
    /// Tombstoned index entries are filtered silently; drafts are filtered
    /// unless `include_drafts`. Filtering happens before pagination, so the
    /// reported totals count exactly the posts a caller can page through.
    /// Non-positive `page`/`page_size` are clamped, never rejected.
    pub async fn list(&self, query: ListQuery) -> Result<PostPage, StoreError> {
        let page = query.page.max(1) as usize;
        let page_size = if query.page_size > 0 {
            query.page_size as usize
        } else {
            DEFAULT_PAGE_SIZE
        };

        let visible = self.visible_posts(query.include_drafts).await?;

        let total = visible.len();
        let total_pages = total.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size).min(total);
        let end = start.saturating_add(page_size).min(total);

        Ok(PostPage {
            posts: visible[start..end].to_vec(),
            total,
            total_pages,
        })
    }

    /// Unpaginated traversal of every post in index order - the admin view.
    pub async fn list_all(&self, include_drafts: bool) -> Result<PostPage, StoreError> {
        let visible = self.visible_posts(include_drafts).await?;
        let total = visible.len();
        Ok(PostPage {
            posts: visible,
            total,
            total_pages: if total == 0 { 0 } else { 1 },
        })
    }

    /// Read-modify-write bump of the view counter on the full record.
    ///
    /// Deliberately not CAS-protected: two racing view events may undercount
    /// by one, which is acceptable loss for a rendering hint. The counter
    /// never moves backwards from this path.
    pub async fn increment_views(&self, post_id: &str) -> Result<(), StoreError> {
        let Some(mut post) = self.records.get(post_id).await? else {
            return Ok(());
        };
        post.views = post.views.saturating_add(1);
        self.records.put(&post).await?;
        Ok(())
    }

    /// Linear case-sensitive substring scan over title/content/excerpt of
    /// the most recent published posts. Explicitly a scan, not an index.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Post>, StoreError> {
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let page = self
            .list(ListQuery {
                page: 1,
                page_size: SEARCH_WINDOW as i64,
                include_drafts: false,
            })
            .await?;

        Ok(page
            .posts
            .into_iter()
            .filter(|post| {
                post.title.contains(keyword)
                    || post.content.contains(keyword)
                    || post.excerpt.contains(keyword)
            })
            .collect())
    }

    /// Fan out over the whole index, drop tombstones, apply the draft filter.
    async fn visible_posts(&self, include_drafts: bool) -> Result<Vec<Post>, StoreError> {
        let ids = self.timeline.ids().await?;
        let fetched = try_join_all(ids.iter().map(|post_id| self.records.get(post_id))).await?;

        Ok(fetched
            .into_iter()
            .flatten()
            .filter(|post| include_drafts || post.status != PostStatus::Draft)
            .collect())
    }
}

fn validate(draft: &PostDraft) -> Result<(), StoreError> {
    if draft.title.is_empty() {
        return Err(StoreError::Validation("title is required".to_string()));
    }
    if draft.content.is_empty() {
        return Err(StoreError::Validation("content is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKv;

    fn store() -> ContentStore {
        ContentStore::new(Arc::new(InMemoryKv::new()))
    }

    fn access() -> WriteAccess {
        WriteAccess::for_session("test-session")
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: format!("{title} content"),
            ..PostDraft::default()
        }
    }

    /// The three-post seed from the archive scenarios: createdAt
    /// 1000/2000/3000, statuses published/draft/published, created oldest
    /// first so the index reads newest first.
    async fn seeded() -> ContentStore {
        let content = store();
        for (title, created_at, status) in [
            ("first", 1000, PostStatus::Published),
            ("second", 2000, PostStatus::Draft),
            ("third", 3000, PostStatus::Published),
        ] {
            let mut d = draft(title);
            d.id = Some(title.to_string());
            d.slug = Some(format!("{title}-slug"));
            d.created_at = Some(created_at);
            d.status = Some(status);
            content.create(d, &access()).await.unwrap();
        }
        content
    }

    #[tokio::test]
    async fn created_ids_appear_exactly_once_in_full_traversal() {
        let content = store();
        let mut ids = Vec::new();
        for i in 0..5 {
            let post = content.create(draft(&format!("post {i}")), &access()).await.unwrap();
            ids.push(post.id);
        }

        let all = content.list_all(true).await.unwrap();
        assert_eq!(all.total, 5);
        for id in &ids {
            assert_eq!(all.posts.iter().filter(|p| &p.id == id).count(), 1);
        }
    }

    #[tokio::test]
    async fn create_requires_title_and_content() {
        let content = store();

        let no_title = PostDraft {
            content: "body".into(),
            ..PostDraft::default()
        };
        assert!(matches!(
            content.create(no_title, &access()).await,
            Err(StoreError::Validation(_))
        ));

        let no_content = PostDraft {
            title: "t".into(),
            ..PostDraft::default()
        };
        assert!(matches!(
            content.create(no_content, &access()).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn list_filters_drafts_before_pagination() {
        let content = seeded().await;

        let page = content
            .list(ListQuery {
                page: 1,
                page_size: 2,
                include_drafts: false,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.posts.len(), 2);
        // Newest first; the draft in between never surfaces.
        assert_eq!(page.posts[0].id, "third");
        assert_eq!(page.posts[1].id, "first");
        assert!(page.posts.iter().all(|p| p.status == PostStatus::Published));
    }

    #[tokio::test]
    async fn malformed_pagination_is_clamped_not_rejected() {
        let content = seeded().await;

        let page = content
            .list(ListQuery {
                page: -5,
                page_size: 0,
                include_drafts: true,
            })
            .await
            .unwrap();

        assert_eq!(page.posts.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_not_an_error() {
        let content = seeded().await;

        let page = content
            .list(ListQuery {
                page: 99,
                page_size: 2,
                include_drafts: true,
            })
            .await
            .unwrap();

        assert!(page.posts.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn get_resolves_both_slug_and_raw_id() {
        let content = store();
        let mut d = draft("dual");
        d.slug = Some("dual-slug".into());
        let created = content.create(d, &access()).await.unwrap();

        let by_slug = content.get("dual-slug").await.unwrap().unwrap();
        let by_id = content.get(&created.id).await.unwrap().unwrap();
        assert_eq!(by_slug.id, created.id);
        assert_eq!(by_id.id, created.id);
    }

    #[tokio::test]
    async fn slug_mapping_wins_over_raw_id_collision() {
        let content = store();

        let mut first = draft("first");
        first.id = Some("shared".into());
        first.slug = Some("first-slug".into());
        content.create(first, &access()).await.unwrap();

        // A second post whose slug equals the first post's raw id.
        let mut second = draft("second");
        second.slug = Some("shared".into());
        let second = content.create(second, &access()).await.unwrap();

        let resolved = content.get("shared").await.unwrap().unwrap();
        assert_eq!(resolved.id, second.id);
    }

    #[tokio::test]
    async fn delete_is_idempotent_boolean() {
        let content = store();
        let post = content.create(draft("gone"), &access()).await.unwrap();

        assert!(content.delete(&post.id, &access()).await.unwrap());
        assert!(content.get(&post.id).await.unwrap().is_none());
        assert!(content.get(&post.slug).await.unwrap().is_none());
        assert!(!content.delete(&post.id, &access()).await.unwrap());

        let all = content.list_all(true).await.unwrap();
        assert_eq!(all.total, 0);
    }

    #[tokio::test]
    async fn update_pins_identity_and_created_at() {
        let content = store();
        let mut d = draft("original");
        d.created_at = Some(1234);
        let created = content.create(d, &access()).await.unwrap();

        let mut replacement = draft("rewritten");
        replacement.views = Some(7);
        let updated = content
            .update(&created.id, replacement, &access())
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, 1234);
        assert_eq!(updated.title, "rewritten");
        assert_eq!(updated.views, 7);
        assert!(updated.updated_at >= created.updated_at);

        // Position in the index is by identity, not recency of edit.
        let all = content.list_all(true).await.unwrap();
        assert_eq!(all.total, 1);
    }

    #[tokio::test]
    async fn old_slug_still_resolves_after_update() {
        let content = store();
        let mut d = draft("moving");
        d.slug = Some("old-slug".into());
        let created = content.create(d, &access()).await.unwrap();

        let mut renamed = draft("moving");
        renamed.slug = Some("new-slug".into());
        content.update(&created.id, renamed, &access()).await.unwrap();

        // Both public URLs resolve to the one post; the old mapping is
        // intentionally left in place.
        let via_new = content.get("new-slug").await.unwrap().unwrap();
        let via_old = content.get("old-slug").await.unwrap().unwrap();
        assert_eq!(via_new.id, created.id);
        assert_eq!(via_old.id, created.id);
        assert_eq!(via_new.slug, "new-slug");
    }

    #[tokio::test]
    async fn increment_views_twice_adds_exactly_two() {
        let content = store();
        let post = content.create(draft("counted"), &access()).await.unwrap();

        content.increment_views(&post.id).await.unwrap();
        content.increment_views(&post.id).await.unwrap();

        let loaded = content.get(&post.id).await.unwrap().unwrap();
        assert_eq!(loaded.views, 2);

        // Bumping a missing id is a silent no-op.
        content.increment_views("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn search_is_case_sensitive_and_skips_drafts() {
        let content = store();

        let mut hit = draft("Rust diary");
        hit.content = "all about Tokio".to_string();
        content.create(hit, &access()).await.unwrap();

        let mut hidden = draft("draft about Tokio");
        hidden.status = Some(PostStatus::Draft);
        content.create(hidden, &access()).await.unwrap();

        let hits = content.search("Tokio").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rust diary");

        assert!(content.search("tokio").await.unwrap().is_empty());
        assert!(content.search("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tombstoned_index_entries_are_filtered_silently() {
        let content = seeded().await;

        // Simulate a dangling index entry: remove the record directly,
        // leaving the id in the time index.
        content.records.delete("third").await.unwrap();

        let page = content
            .list(ListQuery {
                page: 1,
                page_size: 10,
                include_drafts: true,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert!(page.posts.iter().all(|p| p.id != "third"));
    }
}
