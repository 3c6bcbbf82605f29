//! Post category registry.

use std::sync::Arc;

use crate::domain::PostType;
use crate::error::{DomainError, RepoError};
use crate::ports::TypeRepository;

/// Type a post falls back to when saved without one.
pub const DEFAULT_TYPE_NAME: &str = "blog";

/// Manages the small closed set of post categories.
#[derive(Clone)]
pub struct TypeRegistry {
    types: Arc<dyn TypeRepository>,
}

impl TypeRegistry {
    pub fn new(types: Arc<dyn TypeRepository>) -> Self {
        Self { types }
    }

    /// Return the type with this name, creating it when missing.
    ///
    /// Two callers racing to create the same name both end up with the
    /// one row the storage constraint let through.
    pub async fn find_or_create(&self, name: &str) -> Result<PostType, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "can't be blank"));
        }

        if let Some(existing) = self.types.find_by_name(name).await? {
            return Ok(existing);
        }

        match self.types.insert(name).await {
            Ok(created) => {
                tracing::debug!(type_name = %name, type_id = created.id, "Created post type");
                Ok(created)
            }
            // Lost the race: another caller inserted the name first.
            Err(RepoError::Constraint(_)) => {
                self.types.find_by_name(name).await?.ok_or_else(|| {
                    DomainError::Internal(format!("post type '{name}' missing after duplicate insert"))
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<PostType, DomainError> {
        self.types
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "PostType",
                id,
            })
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<PostType>, DomainError> {
        Ok(self.types.find_by_name(name).await?)
    }

    /// All registered types, ascending by id.
    pub async fn list_all(&self) -> Result<Vec<PostType>, DomainError> {
        Ok(self.types.list().await?)
    }
}
