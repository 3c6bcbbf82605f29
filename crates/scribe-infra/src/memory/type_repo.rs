use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::PostType;
use scribe_core::error::RepoError;
use scribe_core::ports::TypeRepository;

/// In-memory post type storage. The name-uniqueness check and the insert
/// share one write lock, making the constraint as hard as a database
/// unique index.
pub struct MemoryTypeRepository {
    rows: RwLock<Vec<PostType>>,
    next_id: AtomicI64,
}

impl MemoryTypeRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryTypeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TypeRepository for MemoryTypeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostType>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|post_type| post_type.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PostType>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|post_type| post_type.name == name)
            .cloned())
    }

    async fn insert(&self, name: &str) -> Result<PostType, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|post_type| post_type.name == name) {
            return Err(RepoError::Constraint(format!(
                "duplicate post type name: {name}"
            )));
        }
        let post_type = PostType {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
        };
        rows.push(post_type.clone());
        Ok(post_type)
    }

    async fn list(&self) -> Result<Vec<PostType>, RepoError> {
        let mut types = self.rows.read().await.clone();
        types.sort_by_key(|post_type| post_type.id);
        Ok(types)
    }
}
