use async_trait::async_trait;

use crate::domain::Comment;
use crate::error::RepoError;

/// Pluggable comment backend.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn comments_for(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;

    async fn add(&self, comment: Comment) -> Result<Comment, RepoError>;
}
