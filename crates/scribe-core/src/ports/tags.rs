use async_trait::async_trait;

use crate::error::RepoError;

/// Tag storage backend. Labels form a set per post; how they are stored
/// physically is the backend's business.
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn tags_for(&self, post_id: i64) -> Result<Vec<String>, RepoError>;

    /// Ids of every post carrying this label.
    async fn posts_tagged(&self, label: &str) -> Result<Vec<i64>, RepoError>;

    /// Replace a post's tag set. An empty slice clears it.
    async fn set_tags(&self, post_id: i64, labels: &[String]) -> Result<(), RepoError>;
}
