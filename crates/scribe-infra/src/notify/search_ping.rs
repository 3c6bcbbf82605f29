//! Search-engine ping channel - the classic "new content here" GET,
//! pointed at a ping endpoint with the announcement URL as a query
//! parameter.

use async_trait::async_trait;

use scribe_core::ports::{Announcement, BroadcastChannel, DispatchError};

pub struct SearchPingChannel {
    name: String,
    endpoint: String,
    client: reqwest::Client,
}

impl SearchPingChannel {
    /// `endpoint` is the engine's ping URL, e.g.
    /// `https://www.bing.com/ping`; the announcement URL is appended as
    /// the `url` query parameter.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BroadcastChannel for SearchPingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", announcement.url.as_str())])
            .send()
            .await
            .map_err(|e| DispatchError::Connection(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| DispatchError::Delivery(e.to_string()))?;
        Ok(())
    }
}
