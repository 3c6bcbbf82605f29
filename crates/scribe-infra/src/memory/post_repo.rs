use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use scribe_core::domain::Post;
use scribe_core::error::RepoError;
use scribe_core::ports::{PostFilter, PostRepository, SavedPost};

/// In-memory post storage over a HashMap behind an async RwLock.
///
/// The whole save runs under the write lock, so the first-publish check
/// always sees the stored prior state.
pub struct MemoryPostRepository {
    rows: RwLock<HashMap<i64, Post>>,
    next_id: AtomicI64,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<SavedPost, RepoError> {
        let mut rows = self.rows.write().await;
        let now = Utc::now();

        if post.id == 0 {
            post.id = self.next_id.fetch_add(1, Ordering::Relaxed);
            post.created_at = now;
            post.published_on = None;
        } else {
            let stored = rows.get(&post.id).ok_or(RepoError::NotFound)?;
            post.created_at = stored.created_at;
            // The stored history wins; callers cannot rewrite the stamp.
            post.published_on = stored.published_on;
        }

        let mut newly_published = false;
        if post.is_published && post.published_on.is_none() {
            post.published_on = Some(now);
            newly_published = true;
        }
        post.updated_at = now;

        rows.insert(post.id, post.clone());
        Ok(SavedPost {
            post,
            newly_published,
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        let mut posts: Vec<Post> = rows
            .values()
            .filter(|post| filter.type_id.is_none_or(|type_id| post.type_id == type_id))
            .filter(|post| {
                filter
                    .ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&post.id))
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
