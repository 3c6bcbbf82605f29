//! Author resolution over heterogeneous host entities.

use std::sync::Arc;

use crate::config::BlogConfig;
use crate::domain::AuthorRef;
use crate::error::DomainError;
use crate::ports::AuthorDirectory;

/// Resolves the acting author for a post at save time.
#[derive(Clone)]
pub struct AuthorResolver {
    directory: Arc<dyn AuthorDirectory>,
    config: Arc<BlogConfig>,
}

impl AuthorResolver {
    pub fn new(config: Arc<BlogConfig>, directory: Arc<dyn AuthorDirectory>) -> Self {
        Self { directory, config }
    }

    /// The explicit author when given, otherwise the configured fallback.
    pub fn resolve(&self, explicit: Option<AuthorRef>) -> Result<AuthorRef, DomainError> {
        if let Some(author) = explicit {
            return Ok(author);
        }
        self.config.default_author.clone().ok_or_else(|| {
            DomainError::Configuration(
                "no author given and no default author configured".to_string(),
            )
        })
    }

    /// Display name for an author reference.
    ///
    /// An absent author renders as an empty string; an author that exists
    /// but lacks the configured display attribute is a configuration
    /// fault, named after the missing capability.
    pub async fn display_name(&self, author: &AuthorRef) -> Result<String, DomainError> {
        let attribute = &self.config.author_display_attribute;
        match self.directory.fetch(author).await? {
            None => Ok(String::new()),
            Some(profile) => match profile.attribute(attribute) {
                Some(value) => Ok(value.to_string()),
                None => Err(DomainError::Configuration(format!(
                    "{}#{} is not defined",
                    author.kind, attribute
                ))),
            },
        }
    }
}
