//! Log-only channel - announcements land in the tracing output.
//! Useful for development hosts and as a dispatch audit trail.

use async_trait::async_trait;

use scribe_core::ports::{Announcement, BroadcastChannel, DispatchError};

pub struct LogChannel;

#[async_trait]
impl BroadcastChannel for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError> {
        tracing::info!(
            post_id = announcement.post_id,
            url = %announcement.url,
            "{}",
            announcement.message
        );
        Ok(())
    }
}
