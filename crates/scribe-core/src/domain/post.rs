use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::author::AuthorRef;

/// Character budget for the short body, omission marker included.
const SHORT_BODY_LIMIT: usize = 400;
const OMISSION: &str = "...";

/// Post entity - a single blog or press article.
///
/// `id` and `created_at` are assigned by storage on first save;
/// `published_on` is stamped by storage on the first transition into
/// published and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub type_id: i64,
    pub blogger: AuthorRef,
    /// Order-insensitive free-text labels, held in the tag store.
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Fresh unsaved post; storage assigns the real id on first save.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        type_id: i64,
        blogger: AuthorRef,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: title.into(),
            body: body.into(),
            type_id,
            blogger,
            tags: Vec::new(),
            is_published: false,
            published_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    /// Body truncated for listing pages: at most 400 characters, cut at
    /// the nearest preceding line break when one falls inside the window.
    /// Always derived, never stored.
    pub fn short_body(&self) -> String {
        truncate_at_boundary(&self.body, SHORT_BODY_LIMIT)
    }

    /// URL-safe identifier combining id and slugified title,
    /// e.g. `42-hello-world`.
    pub fn display_identifier(&self) -> String {
        format!("{}-{}", self.id, slugify(&self.title))
    }

    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

fn truncate_at_boundary(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let window = limit.saturating_sub(OMISSION.len());
    let cut = text
        .char_indices()
        .nth(window)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let head = &text[..cut];
    let head = match head.rfind('\n') {
        Some(newline) => &head[..newline],
        None => head,
    };
    format!("{}{}", head.trim_end(), OMISSION)
}

/// Lowercase, with runs of non-alphanumerics collapsed to single dashes.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    slug
}
