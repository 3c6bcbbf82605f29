//! Publish announcements, fanned out to external broadcast channels.

use std::sync::Arc;

use crate::config::BlogConfig;
use crate::domain::Post;
use crate::ports::{Announcement, BroadcastChannel};

/// Announces freshly published posts to zero or more broadcast channels.
///
/// Dispatch is best-effort: every channel gets an independent attempt
/// with a bounded timeout, and nothing here ever reaches the caller that
/// performed the save.
pub struct PublishNotifier {
    channels: Vec<Arc<dyn BroadcastChannel>>,
    config: Arc<BlogConfig>,
}

impl PublishNotifier {
    pub fn new(config: Arc<BlogConfig>, channels: Vec<Arc<dyn BroadcastChannel>>) -> Self {
        Self { channels, config }
    }

    /// Build the announcement for a published post, or `None` when its
    /// type has no announcement template.
    fn announcement(&self, post: &Post, type_name: &str) -> Option<Announcement> {
        let template = self.config.announcements.get(type_name)?;
        let path = template
            .path
            .replace("{id}", &post.id.to_string())
            .replace("{slug}", &post.slug());
        let url = format!("http://{}{}", self.config.site_hostname, path);
        let message = format!("{} - {} {}", template.headline, post.title, url);
        Some(Announcement {
            post_id: post.id,
            title: post.title.clone(),
            url,
            message,
        })
    }

    /// Deliver to every channel concurrently. Failures and timeouts are
    /// logged and swallowed; one channel never blocks another.
    pub async fn notify(&self, post: &Post, type_name: &str) {
        let Some(announcement) = self.announcement(post, type_name) else {
            tracing::debug!(
                post_id = post.id,
                type_name = %type_name,
                "No announcement template for type, skipping"
            );
            return;
        };

        tracing::info!(
            post_id = post.id,
            message = %announcement.message,
            "Announcing published post"
        );

        let deliveries = self.channels.iter().map(|channel| {
            let channel = Arc::clone(channel);
            let announcement = announcement.clone();
            let budget = self.config.dispatch_timeout;
            async move {
                match tokio::time::timeout(budget, channel.deliver(&announcement)).await {
                    Ok(Ok(())) => {
                        tracing::debug!(
                            channel = channel.name(),
                            post_id = announcement.post_id,
                            "Announcement delivered"
                        );
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(
                            channel = channel.name(),
                            post_id = announcement.post_id,
                            error = %e,
                            "Announcement delivery failed"
                        );
                    }
                    Err(_) => {
                        tracing::warn!(
                            channel = channel.name(),
                            post_id = announcement.post_id,
                            "Announcement delivery timed out"
                        );
                    }
                }
            }
        });
        futures::future::join_all(deliveries).await;
    }
}
