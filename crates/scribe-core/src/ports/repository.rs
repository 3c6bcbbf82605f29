use async_trait::async_trait;

use crate::domain::{Post, PostType};
use crate::error::RepoError;

/// Filter for listing posts; restrictions AND-combine.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Restrict to posts of this type.
    pub type_id: Option<i64>,
    /// Restrict to this id allow-list (resolved from a tag lookup).
    pub ids: Option<Vec<i64>>,
}

/// Outcome of persisting a post.
#[derive(Debug, Clone)]
pub struct SavedPost {
    pub post: Post,
    /// True when this save was the post's first transition into published.
    pub newly_published: bool,
}

/// Post storage.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Persist a post (insert when `id == 0`, update otherwise).
    ///
    /// Storage assigns the id and keeps `created_at` immutable. The
    /// publish timestamp is stamped here, atomically against the stored
    /// prior state: a post arriving published while the stored
    /// `published_on` is still empty gets the current time, exactly once.
    /// Caller-supplied `published_on` values are ignored; the stored
    /// history wins.
    async fn save(&self, post: Post) -> Result<SavedPost, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// List posts ordered by creation time, newest first (id breaks
    /// ties), sliced by offset/limit.
    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;
}

/// Post type storage. Name uniqueness is a hard storage constraint.
#[async_trait]
pub trait TypeRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostType>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<PostType>, RepoError>;

    /// Insert a new type. A duplicate name surfaces as
    /// [`RepoError::Constraint`], never as a second row.
    async fn insert(&self, name: &str) -> Result<PostType, RepoError>;

    /// All types, ascending by id.
    async fn list(&self) -> Result<Vec<PostType>, RepoError>;
}
