//! Database connection bootstrap.

use std::env;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Connection settings for the module's database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read from `DATABASE_URL` plus the `DB_*` pool knobs; `None` when no
    /// database is configured (hosts then fall back to the in-memory
    /// adapters).
    pub fn from_env() -> Option<Self> {
        let url = env::var("DATABASE_URL").ok()?;
        Some(Self {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }

    pub async fn connect(&self) -> Result<DbConn, DbErr> {
        let options = ConnectOptions::new(&self.url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(options).await?;
        tracing::info!(pool = self.max_connections, "Database connected");
        Ok(conn)
    }
}
