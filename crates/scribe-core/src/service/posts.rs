//! Post lifecycle - the write side of the module.

use std::sync::Arc;

use crate::config::{BlogConfig, CommentBackend};
use crate::domain::{AuthorRef, Comment, Post, PostType};
use crate::error::{DomainError, RepoError, ValidationErrors};
use crate::ports::{CommentStore, PostRepository, TagStore};
use crate::service::author::AuthorResolver;
use crate::service::notifier::PublishNotifier;
use crate::service::types::{DEFAULT_TYPE_NAME, TypeRegistry};

/// Minimum body length, in characters.
const BODY_MIN_CHARS: usize = 10;

/// Draft for a new post. Type and author may be left unset; the save
/// pipeline fills in the defaults.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub type_id: Option<i64>,
    pub blogger: Option<AuthorRef>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// Partial update; unset fields keep their current values. The publish
/// timestamp is not patchable.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub type_id: Option<i64>,
    pub blogger: Option<AuthorRef>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// The write aggregate. Every mutation runs the same ordered pipeline:
/// default the type, default the author, validate, persist, sync tags,
/// announce a first publish.
///
/// Hosts caching the read side should treat `create`, `update` and
/// `destroy` as their cache invalidation points.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagStore>,
    comments: Option<Arc<dyn CommentStore>>,
    types: TypeRegistry,
    authors: AuthorResolver,
    notifier: Arc<PublishNotifier>,
    config: Arc<BlogConfig>,
}

impl PostService {
    pub fn new(
        config: Arc<BlogConfig>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagStore>,
        types: TypeRegistry,
        authors: AuthorResolver,
        notifier: Arc<PublishNotifier>,
    ) -> Self {
        Self {
            posts,
            tags,
            comments: None,
            types,
            authors,
            notifier,
            config,
        }
    }

    /// Wire the pluggable comment backend.
    pub fn with_comment_store(mut self, store: Arc<dyn CommentStore>) -> Self {
        self.comments = Some(store);
        self
    }

    /// Create a post from a draft. Field-level validation failures are
    /// returned without persisting anything.
    pub async fn create(&self, draft: NewPost) -> Result<Post, DomainError> {
        let post_type = self.resolve_type(draft.type_id).await?;
        let blogger = self.authors.resolve(draft.blogger)?;
        self.validate(&draft.title, &draft.body)?;

        let post = Post::new(draft.title, draft.body, post_type.id, blogger)
            .published(draft.is_published);
        let saved = self.posts.save(post).await?;

        self.tags.set_tags(saved.post.id, &draft.tags).await?;
        let mut post = saved.post;
        post.tags = self.tags.tags_for(post.id).await?;

        tracing::info!(post_id = post.id, type_name = %post_type.name, "Created post");
        if saved.newly_published {
            self.announce(&post, &post_type.name);
        }
        Ok(post)
    }

    /// Merge a patch over an existing post and run the save pipeline
    /// again, exactly as `create` does.
    pub async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, DomainError> {
        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;

        let post_type = self
            .resolve_type(patch.type_id.or(Some(existing.type_id)))
            .await?;
        let blogger = self
            .authors
            .resolve(patch.blogger.or(Some(existing.blogger)))?;
        let title = patch.title.unwrap_or(existing.title);
        let body = patch.body.unwrap_or(existing.body);
        self.validate(&title, &body)?;

        let tags = match patch.tags {
            Some(labels) => labels,
            None => self.tags.tags_for(id).await?,
        };

        let post = Post {
            id,
            title,
            body,
            type_id: post_type.id,
            blogger,
            tags: Vec::new(),
            is_published: patch.is_published.unwrap_or(existing.is_published),
            published_on: existing.published_on,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        };
        let saved = self.posts.save(post).await?;

        self.tags.set_tags(id, &tags).await?;
        let mut post = saved.post;
        post.tags = self.tags.tags_for(id).await?;

        tracing::debug!(post_id = id, "Updated post");
        if saved.newly_published {
            self.announce(&post, &post_type.name);
        }
        Ok(post)
    }

    /// Remove a post and its tag associations. No other cascades.
    pub async fn destroy(&self, id: i64) -> Result<(), DomainError> {
        match self.posts.delete(id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => {
                return Err(DomainError::NotFound {
                    entity_type: "Post",
                    id,
                });
            }
            Err(e) => return Err(e.into()),
        }
        self.tags.set_tags(id, &[]).await?;
        tracing::info!(post_id = id, "Destroyed post");
        Ok(())
    }

    /// Comments on a post, through the pluggable backend.
    pub async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let store = self.comment_store()?;
        self.require_post(post_id).await?;
        Ok(store.comments_for(post_id).await?)
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        author_name: &str,
        body: &str,
    ) -> Result<Comment, DomainError> {
        let store = self.comment_store()?;
        self.require_post(post_id).await?;
        Ok(store.add(Comment::new(post_id, author_name, body)).await?)
    }

    /// Display name of a post's credited author.
    pub async fn blogger_display_name(&self, post: &Post) -> Result<String, DomainError> {
        self.authors.display_name(&post.blogger).await
    }

    async fn resolve_type(&self, type_id: Option<i64>) -> Result<PostType, DomainError> {
        match type_id {
            Some(id) => match self.types.find_by_id(id).await {
                Err(DomainError::NotFound { .. }) => Err(DomainError::validation(
                    "type",
                    format!("no post type with id {id}"),
                )),
                other => other,
            },
            None => self.types.find_or_create(DEFAULT_TYPE_NAME).await,
        }
    }

    fn validate(&self, title: &str, body: &str) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::default();

        let title_chars = title.chars().count();
        if title_chars == 0 {
            errors.add("title", "can't be blank");
        } else if title_chars > self.config.title_max_chars {
            errors.add(
                "title",
                format!(
                    "is too long (maximum is {} characters)",
                    self.config.title_max_chars
                ),
            );
        }

        let body_chars = body.chars().count();
        if body_chars == 0 {
            errors.add("body", "can't be blank");
        } else if body_chars < BODY_MIN_CHARS {
            errors.add(
                "body",
                format!("is too short (minimum is {BODY_MIN_CHARS} characters)"),
            );
        }

        errors.into_result()
    }

    async fn require_post(&self, id: i64) -> Result<(), DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    fn comment_store(&self) -> Result<&Arc<dyn CommentStore>, DomainError> {
        if self.config.comments != CommentBackend::Native {
            return Err(DomainError::Configuration(
                "comments are disabled (check the comment backend setting)".to_string(),
            ));
        }
        self.comments.as_ref().ok_or_else(|| {
            DomainError::Configuration(
                "comment backend is native but no comment store is wired".to_string(),
            )
        })
    }

    /// Dispatch happens off the caller's path, once the save is durable.
    fn announce(&self, post: &Post, type_name: &str) {
        let notifier = Arc::clone(&self.notifier);
        let post = post.clone();
        let type_name = type_name.to_string();
        tokio::spawn(async move {
            notifier.notify(&post, &type_name).await;
        });
    }
}
