//! Post queries - the read side of the module.

use std::sync::Arc;

use crate::config::BlogConfig;
use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{PostFilter, PostRepository, TagStore, TypeRepository};

/// Parameters for the paginated index listing.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// 1-based page number; zero behaves as page one.
    pub page: u64,
    /// Page size override; the configured posts-per-page when unset.
    pub per_page: Option<u64>,
    /// Restrict to posts whose type has this name.
    pub type_name: Option<String>,
    /// Restrict to posts carrying this tag.
    pub tag: Option<String>,
}

impl ListRequest {
    pub fn page(page: u64) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}

/// Read-only queries. Shares storage with the write path and nothing
/// else.
pub struct PostQueries {
    posts: Arc<dyn PostRepository>,
    types: Arc<dyn TypeRepository>,
    tags: Arc<dyn TagStore>,
    config: Arc<BlogConfig>,
}

impl PostQueries {
    pub fn new(
        config: Arc<BlogConfig>,
        posts: Arc<dyn PostRepository>,
        types: Arc<dyn TypeRepository>,
        tags: Arc<dyn TagStore>,
    ) -> Self {
        Self {
            posts,
            types,
            tags,
            config,
        }
    }

    /// Posts for an index page, newest first. Type and tag filters
    /// AND-combine, type first; filters that match nothing and pages past
    /// the end both yield an empty sequence, never an error.
    pub async fn list_for_index(&self, request: &ListRequest) -> Result<Vec<Post>, DomainError> {
        let per_page = request.per_page.unwrap_or(self.config.posts_per_page);
        if per_page == 0 {
            return Ok(Vec::new());
        }
        let page = request.page.max(1);

        let mut filter = PostFilter::default();
        if let Some(name) = &request.type_name {
            match self.types.find_by_name(name).await? {
                Some(post_type) => filter.type_id = Some(post_type.id),
                None => return Ok(Vec::new()),
            }
        }
        if let Some(label) = &request.tag {
            let ids = self.tags.posts_tagged(label).await?;
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            filter.ids = Some(ids);
        }

        let offset = (page - 1) * per_page;
        let mut posts = self.posts.list(&filter, offset, per_page).await?;
        for post in &mut posts {
            post.tags = self.tags.tags_for(post.id).await?;
        }
        Ok(posts)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;
        post.tags = self.tags.tags_for(id).await?;
        Ok(post)
    }
}
