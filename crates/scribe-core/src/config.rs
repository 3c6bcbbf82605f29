//! Module configuration supplied by the host application.
//!
//! Nothing is looked up by convention: the fallback author, page sizes
//! and announcement wording all arrive through this struct.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::domain::AuthorRef;

/// How a type's announcement is worded and where its articles live.
#[derive(Debug, Clone)]
pub struct AnnouncementTemplate {
    /// Leading phrase, e.g. "New blog post".
    pub headline: String,
    /// Site-relative path with `{id}` and `{slug}` placeholders.
    pub path: String,
}

impl AnnouncementTemplate {
    pub fn new(headline: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            path: path.into(),
        }
    }
}

/// Comment backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentBackend {
    /// Comments are not served by this module.
    #[default]
    Disabled,
    /// Comments go through the injected comment store.
    Native,
}

/// Read-only settings for the blogging module.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Default page size for index listings.
    pub posts_per_page: u64,
    /// Upper bound on title length, in characters.
    pub title_max_chars: usize,
    /// Author credited when a post is saved without one.
    pub default_author: Option<AuthorRef>,
    /// Profile attribute used as an author's display name.
    pub author_display_attribute: String,
    /// Hostname announcements link back to.
    pub site_hostname: String,
    /// Announcement wording per type name. Types without an entry are
    /// never announced.
    pub announcements: HashMap<String, AnnouncementTemplate>,
    pub comments: CommentBackend,
    /// Per-channel delivery budget for publish announcements.
    pub dispatch_timeout: Duration,
}

impl Default for BlogConfig {
    fn default() -> Self {
        let mut announcements = HashMap::new();
        announcements.insert(
            "blog".to_string(),
            AnnouncementTemplate::new("New blog post", "/blog/{id}"),
        );
        announcements.insert(
            "press".to_string(),
            AnnouncementTemplate::new("New press release", "/press/{id}"),
        );

        Self {
            posts_per_page: 10,
            title_max_chars: 72,
            default_author: None,
            author_display_attribute: "username".to_string(),
            site_hostname: "localhost".to_string(),
            announcements,
            comments: CommentBackend::Disabled,
            dispatch_timeout: Duration::from_secs(10),
        }
    }
}

impl BlogConfig {
    /// Load the scalar settings from `BLOG_*` environment variables.
    ///
    /// Collaborator objects (fallback author, announcement templates,
    /// channels, stores) have no env representation and are wired in code
    /// by the host.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            posts_per_page: env::var("BLOG_POSTS_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.posts_per_page),
            title_max_chars: env::var("BLOG_TITLE_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.title_max_chars),
            author_display_attribute: env::var("BLOG_AUTHOR_DISPLAY_ATTRIBUTE")
                .unwrap_or(defaults.author_display_attribute),
            site_hostname: env::var("BLOG_SITE_HOSTNAME").unwrap_or(defaults.site_hostname),
            dispatch_timeout: env::var("BLOG_DISPATCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.dispatch_timeout),
            ..defaults
        }
    }
}
