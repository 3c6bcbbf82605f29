use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{AuthorProfile, AuthorRef};
use scribe_core::error::RepoError;
use scribe_core::ports::AuthorDirectory;

/// In-memory author directory. Hosts without their own directory (and
/// the test suite) register profiles up front.
pub struct MemoryAuthorDirectory {
    rows: RwLock<HashMap<(String, Uuid), AuthorProfile>>,
}

impl MemoryAuthorDirectory {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, author: AuthorRef, profile: AuthorProfile) {
        self.rows
            .write()
            .await
            .insert((author.kind, author.id), profile);
    }
}

impl Default for MemoryAuthorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorDirectory for MemoryAuthorDirectory {
    async fn fetch(&self, author: &AuthorRef) -> Result<Option<AuthorProfile>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&(author.kind.clone(), author.id))
            .cloned())
    }
}
