//! Service-level tests wiring the core pipeline to the in-memory
//! adapters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::config::{BlogConfig, CommentBackend};
use scribe_core::domain::{AuthorProfile, AuthorRef};
use scribe_core::error::DomainError;
use scribe_core::ports::{Announcement, BroadcastChannel, DispatchError};
use scribe_core::service::{
    AuthorResolver, ListRequest, NewPost, PostPatch, PostQueries, PostService, PublishNotifier,
    TypeRegistry,
};

use super::*;

struct RecordingChannel {
    delivered: Mutex<Vec<Announcement>>,
}

impl RecordingChannel {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
        })
    }

    fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    fn last(&self) -> Announcement {
        self.delivered.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl BroadcastChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError> {
        self.delivered.lock().unwrap().push(announcement.clone());
        Ok(())
    }
}

fn admin() -> AuthorRef {
    AuthorRef::new("user", Uuid::from_u128(1))
}

fn default_config() -> BlogConfig {
    BlogConfig {
        default_author: Some(admin()),
        site_hostname: "example.com".to_string(),
        comments: CommentBackend::Native,
        ..BlogConfig::default()
    }
}

struct Harness {
    service: PostService,
    queries: PostQueries,
    registry: TypeRegistry,
    resolver: AuthorResolver,
    directory: Arc<MemoryAuthorDirectory>,
    channel: Arc<RecordingChannel>,
}

fn harness() -> Harness {
    harness_with(default_config())
}

fn harness_with(config: BlogConfig) -> Harness {
    let config = Arc::new(config);
    let posts = Arc::new(MemoryPostRepository::new());
    let types = Arc::new(MemoryTypeRepository::new());
    let tags = Arc::new(MemoryTagStore::new());
    let directory = Arc::new(MemoryAuthorDirectory::new());
    let channel = RecordingChannel::new();

    let registry = TypeRegistry::new(types.clone());
    let resolver = AuthorResolver::new(config.clone(), directory.clone());
    let notifier = Arc::new(PublishNotifier::new(config.clone(), vec![channel.clone()]));

    let service = PostService::new(
        config.clone(),
        posts.clone(),
        tags.clone(),
        registry.clone(),
        resolver.clone(),
        notifier,
    )
    .with_comment_store(Arc::new(MemoryCommentStore::new()));
    let queries = PostQueries::new(config, posts, types, tags);

    Harness {
        service,
        queries,
        registry,
        resolver,
        directory,
        channel,
    }
}

fn draft(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        body: "A sufficiently long body.".to_string(),
        ..NewPost::default()
    }
}

/// Let the spawned announcement task run to completion.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

fn validation_fields(error: DomainError) -> Vec<&'static str> {
    match error {
        DomainError::Validation(errors) => errors.fields(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn defaults_type_to_blog_when_unset() {
    let h = harness();
    let post = h.service.create(draft("Untyped")).await.unwrap();

    let post_type = h.registry.find_by_id(post.type_id).await.unwrap();
    assert_eq!(post_type.name, "blog");
}

#[tokio::test]
async fn defaults_author_to_configured_fallback() {
    let h = harness();
    let post = h.service.create(draft("Anonymous")).await.unwrap();

    assert_eq!(post.blogger, admin());
}

#[tokio::test]
async fn explicit_author_passes_through_unchanged() {
    let h = harness();
    let guest = AuthorRef::new("member", Uuid::from_u128(7));
    let post = h
        .service
        .create(NewPost {
            blogger: Some(guest.clone()),
            ..draft("Guest post")
        })
        .await
        .unwrap();

    assert_eq!(post.blogger, guest);
}

#[tokio::test]
async fn missing_fallback_author_is_a_configuration_error() {
    let h = harness_with(BlogConfig {
        default_author: None,
        ..default_config()
    });

    let error = h.service.create(draft("Orphan")).await.unwrap_err();
    assert!(matches!(error, DomainError::Configuration(_)));
}

#[tokio::test]
async fn publish_timestamp_is_stamped_exactly_once() {
    let h = harness();
    let post = h
        .service
        .create(NewPost {
            is_published: true,
            ..draft("Stamped")
        })
        .await
        .unwrap();
    let first_stamp = post.published_on.expect("published post has a timestamp");

    let unpublished = h
        .service
        .update(
            post.id,
            PostPatch {
                is_published: Some(false),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(!unpublished.is_published);
    assert_eq!(unpublished.published_on, Some(first_stamp));

    let republished = h
        .service
        .update(
            post.id,
            PostPatch {
                is_published: Some(true),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(republished.published_on, Some(first_stamp));
}

#[tokio::test]
async fn announces_exactly_once_per_post_lifetime() {
    let h = harness();
    let post = h.service.create(draft("Quiet at first")).await.unwrap();
    settle().await;
    assert_eq!(h.channel.count(), 0);

    h.service
        .update(
            post.id,
            PostPatch {
                is_published: Some(true),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();
    settle().await;
    assert_eq!(h.channel.count(), 1);

    for published in [false, true] {
        h.service
            .update(
                post.id,
                PostPatch {
                    is_published: Some(published),
                    ..PostPatch::default()
                },
            )
            .await
            .unwrap();
    }
    settle().await;
    assert_eq!(h.channel.count(), 1);
}

#[tokio::test]
async fn announcement_carries_the_formatted_url() {
    let h = harness();
    let post = h
        .service
        .create(NewPost {
            is_published: true,
            ..draft("Hello, World!")
        })
        .await
        .unwrap();
    settle().await;

    assert_eq!(h.channel.count(), 1);
    let announcement = h.channel.last();
    assert_eq!(
        announcement.url,
        format!("http://example.com/blog/{}", post.id)
    );
    assert_eq!(
        announcement.message,
        format!("New blog post - Hello, World! http://example.com/blog/{}", post.id)
    );
}

#[tokio::test]
async fn index_is_newest_first_and_paginated() {
    let h = harness();
    for n in 1..=5 {
        h.service.create(draft(&format!("post-{n}"))).await.unwrap();
    }

    let titles = |posts: Vec<scribe_core::domain::Post>| {
        posts.into_iter().map(|p| p.title).collect::<Vec<_>>()
    };

    let page = |n| ListRequest {
        page: n,
        per_page: Some(2),
        ..ListRequest::default()
    };

    let first = h.queries.list_for_index(&page(1)).await.unwrap();
    assert_eq!(titles(first), vec!["post-5", "post-4"]);

    let second = h.queries.list_for_index(&page(2)).await.unwrap();
    assert_eq!(titles(second), vec!["post-3", "post-2"]);

    let third = h.queries.list_for_index(&page(3)).await.unwrap();
    assert_eq!(titles(third), vec!["post-1"]);

    let past_the_end = h.queries.list_for_index(&page(4)).await.unwrap();
    assert!(past_the_end.is_empty());
}

#[tokio::test]
async fn default_page_size_comes_from_configuration() {
    let h = harness_with(BlogConfig {
        posts_per_page: 3,
        ..default_config()
    });
    for n in 1..=4 {
        h.service.create(draft(&format!("post-{n}"))).await.unwrap();
    }

    let posts = h.queries.list_for_index(&ListRequest::page(1)).await.unwrap();
    assert_eq!(posts.len(), 3);
}

#[tokio::test]
async fn filters_by_type_name() {
    let h = harness();
    let press = h.registry.find_or_create("press").await.unwrap();

    h.service.create(draft("On the blog")).await.unwrap();
    h.service.create(draft("Also on the blog")).await.unwrap();
    h.service
        .create(NewPost {
            type_id: Some(press.id),
            ..draft("In the papers")
        })
        .await
        .unwrap();

    let request = |type_name: &str| ListRequest {
        page: 1,
        type_name: Some(type_name.to_string()),
        ..ListRequest::default()
    };

    assert_eq!(h.queries.list_for_index(&request("press")).await.unwrap().len(), 1);
    assert_eq!(h.queries.list_for_index(&request("blog")).await.unwrap().len(), 2);
    assert!(h.queries.list_for_index(&request("video")).await.unwrap().is_empty());
}

#[tokio::test]
async fn filters_by_tag_and_combines_with_type() {
    let h = harness();
    let press = h.registry.find_or_create("press").await.unwrap();

    h.service
        .create(NewPost {
            tags: vec!["rust".to_string()],
            ..draft("Rust on the blog")
        })
        .await
        .unwrap();
    h.service
        .create(NewPost {
            type_id: Some(press.id),
            tags: vec!["rust".to_string(), "news".to_string()],
            ..draft("Rust in the papers")
        })
        .await
        .unwrap();
    h.service
        .create(NewPost {
            tags: vec!["news".to_string()],
            ..draft("Blog news")
        })
        .await
        .unwrap();

    let tagged_rust = h
        .queries
        .list_for_index(&ListRequest {
            page: 1,
            tag: Some("rust".to_string()),
            ..ListRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(tagged_rust.len(), 2);

    let blog_and_rust = h
        .queries
        .list_for_index(&ListRequest {
            page: 1,
            type_name: Some("blog".to_string()),
            tag: Some("rust".to_string()),
            ..ListRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(blog_and_rust.len(), 1);
    assert_eq!(blog_and_rust[0].title, "Rust on the blog");

    let unused_label = h
        .queries
        .list_for_index(&ListRequest {
            page: 1,
            tag: Some("golf".to_string()),
            ..ListRequest::default()
        })
        .await
        .unwrap();
    assert!(unused_label.is_empty());
}

#[tokio::test]
async fn validation_reports_only_the_short_body() {
    let h = harness();
    let error = h
        .service
        .create(NewPost {
            title: "A".to_string(),
            body: "short".to_string(),
            ..NewPost::default()
        })
        .await
        .unwrap_err();

    assert_eq!(validation_fields(error), vec!["body"]);
}

#[tokio::test]
async fn validation_collects_every_failing_field() {
    let h = harness();

    let blank = h
        .service
        .create(NewPost::default())
        .await
        .unwrap_err();
    assert_eq!(validation_fields(blank), vec!["title", "body"]);

    let too_long = h
        .service
        .create(NewPost {
            title: "x".repeat(73),
            body: "short".to_string(),
            ..NewPost::default()
        })
        .await
        .unwrap_err();
    assert_eq!(validation_fields(too_long), vec!["title", "body"]);
}

#[tokio::test]
async fn nothing_persists_when_validation_fails() {
    let h = harness();
    let _ = h
        .service
        .create(NewPost {
            title: "Bad".to_string(),
            body: "short".to_string(),
            ..NewPost::default()
        })
        .await
        .unwrap_err();

    let posts = h.queries.list_for_index(&ListRequest::page(1)).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn concurrent_find_or_create_converges_on_one_row() {
    let h = harness();

    let left = {
        let registry = h.registry.clone();
        tokio::spawn(async move { registry.find_or_create("press").await })
    };
    let right = {
        let registry = h.registry.clone();
        tokio::spawn(async move { registry.find_or_create("press").await })
    };

    let left = left.await.unwrap().unwrap();
    let right = right.await.unwrap().unwrap();
    assert_eq!(left.id, right.id);

    let press_rows = h
        .registry
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|post_type| post_type.name == "press")
        .count();
    assert_eq!(press_rows, 1);
}

#[tokio::test]
async fn list_all_types_is_ordered_by_id() {
    let h = harness();
    for name in ["blog", "press", "video"] {
        h.registry.find_or_create(name).await.unwrap();
    }

    let names: Vec<String> = h
        .registry
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|post_type| post_type.name)
        .collect();
    assert_eq!(names, vec!["blog", "press", "video"]);
}

#[tokio::test]
async fn find_or_create_rejects_blank_names() {
    let h = harness();

    for blank in ["", "   "] {
        let error = h.registry.find_or_create(blank).await.unwrap_err();
        assert_eq!(validation_fields(error), vec!["name"]);
    }
}

#[tokio::test]
async fn update_merges_patch_over_existing_fields() {
    let h = harness();
    let post = h
        .service
        .create(NewPost {
            tags: vec!["rust".to_string()],
            ..draft("Original title")
        })
        .await
        .unwrap();

    let updated = h
        .service
        .update(
            post.id,
            PostPatch {
                title: Some("New title".to_string()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.body, post.body);
    assert_eq!(updated.tags, vec!["rust".to_string()]);
    assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn update_of_missing_post_is_not_found() {
    let h = harness();
    let error = h
        .service
        .update(999, PostPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(error, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn destroy_removes_post_and_tag_associations() {
    let h = harness();
    let post = h
        .service
        .create(NewPost {
            tags: vec!["rust".to_string()],
            ..draft("Doomed")
        })
        .await
        .unwrap();

    h.service.destroy(post.id).await.unwrap();

    assert!(matches!(
        h.queries.find_by_id(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
    let tagged = h
        .queries
        .list_for_index(&ListRequest {
            page: 1,
            tag: Some("rust".to_string()),
            ..ListRequest::default()
        })
        .await
        .unwrap();
    assert!(tagged.is_empty());

    assert!(matches!(
        h.service.destroy(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn comments_require_a_configured_backend() {
    let h = harness_with(BlogConfig {
        comments: CommentBackend::Disabled,
        ..default_config()
    });

    let error = h.service.comments(1).await.unwrap_err();
    assert!(matches!(error, DomainError::Configuration(_)));
}

#[tokio::test]
async fn comments_roundtrip_through_the_backend() {
    let h = harness();
    let post = h.service.create(draft("Discussed")).await.unwrap();

    h.service
        .add_comment(post.id, "reader", "Nice post!")
        .await
        .unwrap();
    let comments = h.service.comments(post.id).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_name, "reader");

    assert!(matches!(
        h.service.add_comment(999, "reader", "Lost").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn blogger_display_name_reads_the_configured_attribute() {
    let h = harness();
    h.directory
        .register(admin(), AuthorProfile::new().with_attribute("username", "admin"))
        .await;

    let post = h.service.create(draft("Signed")).await.unwrap();
    assert_eq!(h.service.blogger_display_name(&post).await.unwrap(), "admin");
}

#[tokio::test]
async fn absent_authors_display_as_empty_string() {
    let h = harness();
    let ghost = AuthorRef::new("user", Uuid::from_u128(404));

    assert_eq!(h.resolver.display_name(&ghost).await.unwrap(), "");
}

#[tokio::test]
async fn authors_without_the_attribute_are_a_configuration_error() {
    let h = harness();
    let author = AuthorRef::new("user", Uuid::from_u128(9));
    h.directory
        .register(
            author.clone(),
            AuthorProfile::new().with_attribute("email", "someone@example.com"),
        )
        .await;

    let error = h.resolver.display_name(&author).await.unwrap_err();
    match error {
        DomainError::Configuration(message) => {
            assert!(message.contains("user#username"));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn tags_are_trimmed_and_deduplicated() {
    let h = harness();
    let post = h
        .service
        .create(NewPost {
            tags: vec!["Rust ".to_string(), "Rust".to_string(), "  ".to_string()],
            ..draft("Tidy tags")
        })
        .await
        .unwrap();

    assert_eq!(post.tags, vec!["Rust".to_string()]);
}
