//! Redis channel - announcements go out as pub/sub messages for other
//! processes (feed builders, cache warmers) to pick up.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use scribe_core::ports::{Announcement, BroadcastChannel, DispatchError};

#[derive(Debug, Clone)]
pub struct RedisChannelConfig {
    pub url: String,
    /// Pub/sub channel announcements are published on.
    pub channel: String,
    pub connect_timeout: Duration,
}

impl RedisChannelConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            channel: env::var("BLOG_ANNOUNCE_CHANNEL")
                .unwrap_or_else(|_| "blog:announcements".to_string()),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Redis-backed broadcast channel.
pub struct RedisChannel {
    conn: ConnectionManager,
    channel: String,
}

impl RedisChannel {
    pub async fn new(config: RedisChannelConfig) -> Result<Self, DispatchError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DispatchError::Connection(e.to_string()))?;

        // Bounded connect so an unreachable Redis cannot hang host startup
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| DispatchError::Connection("Connection timed out".to_string()))?
            .map_err(|e| DispatchError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, channel = %config.channel, "Connected Redis announcement channel");

        Ok(Self {
            conn,
            channel: config.channel,
        })
    }

    pub async fn from_env() -> Result<Self, DispatchError> {
        Self::new(RedisChannelConfig::from_env()).await
    }
}

#[async_trait]
impl BroadcastChannel for RedisChannel {
    fn name(&self) -> &str {
        "redis"
    }

    async fn deliver(&self, announcement: &Announcement) -> Result<(), DispatchError> {
        let payload = serde_json::to_string(announcement)
            .map_err(|e| DispatchError::Delivery(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(&self.channel, payload)
            .await
            .map_err(|e| DispatchError::Delivery(e.to_string()))?;
        Ok(())
    }
}
