//! Broadcast channel port - external services announced to on publish.

use async_trait::async_trait;
use serde::Serialize;

/// Announcement pushed to external services when a post is first
/// published.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub post_id: i64,
    pub title: String,
    /// Fully-qualified link to the article.
    pub url: String,
    /// Preformatted human-readable line,
    /// e.g. `New blog post - Hello http://example.com/blog/42`.
    pub message: String,
}

/// One external announcement sink. Delivery is best-effort; a failure
/// here never reaches the publisher.
#[async_trait]
pub trait BroadcastChannel: Send + Sync {
    /// Channel name used in logs.
    fn name(&self) -> &str;

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError>;
}

/// Channel delivery errors. Logged per channel, never propagated, never
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to deliver announcement: {0}")]
    Delivery(String),

    #[error("Connection error: {0}")]
    Connection(String),
}
