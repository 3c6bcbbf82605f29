use async_trait::async_trait;

use crate::domain::{AuthorProfile, AuthorRef};
use crate::error::RepoError;

/// The host's lookup for heterogeneous author entities.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Profile for a referenced author; `None` when the entity does not
    /// exist on the host side.
    async fn fetch(&self, author: &AuthorRef) -> Result<Option<AuthorProfile>, RepoError>;
}
