//! Webhook channel - posts announcements to an HTTP endpoint
//! (Slack-style incoming webhooks, Discord, social bridges).

use async_trait::async_trait;

use scribe_core::ports::{Announcement, BroadcastChannel, DispatchError};

pub struct WebhookChannel {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BroadcastChannel for WebhookChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError> {
        let payload = serde_json::json!({
            "text": announcement.message,
            "url": announcement.url,
            "post_id": announcement.post_id,
            "title": announcement.title,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Connection(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| DispatchError::Delivery(e.to_string()))?;
        Ok(())
    }
}
