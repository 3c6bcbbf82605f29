use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::Comment;
use scribe_core::error::RepoError;
use scribe_core::ports::CommentStore;

/// In-memory comment backend.
pub struct MemoryCommentStore {
    rows: RwLock<HashMap<i64, Vec<Comment>>>,
    next_id: AtomicI64,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn comments_for(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add(&self, mut comment: Comment) -> Result<Comment, RepoError> {
        comment.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut rows = self.rows.write().await;
        rows.entry(comment.post_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }
}
