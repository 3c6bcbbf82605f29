//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`: the
//! in-memory adapters every host gets, the PostgreSQL adapters, and the
//! broadcast channels announcements go out on.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory adapters and the log channel only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `webhook` - Webhook and search-engine-ping channels via reqwest
//! - `redis` - Redis pub/sub announcement channel

pub mod memory;
pub mod notify;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports - In-Memory
pub use memory::{
    MemoryAuthorDirectory, MemoryCommentStore, MemoryPostRepository, MemoryTagStore,
    MemoryTypeRepository,
};

// Re-exports - Channels
pub use notify::LogChannel;

#[cfg(feature = "webhook")]
pub use notify::{SearchPingChannel, WebhookChannel};

#[cfg(feature = "redis")]
pub use notify::{RedisChannel, RedisChannelConfig};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCommentStore, PostgresPostRepository, PostgresTagStore,
    PostgresTypeRepository,
};
