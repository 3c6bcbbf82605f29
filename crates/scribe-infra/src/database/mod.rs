//! PostgreSQL storage adapters, built on SeaORM.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use postgres_repo::{
    PostgresCommentStore, PostgresPostRepository, PostgresTagStore, PostgresTypeRepository,
};

#[cfg(test)]
mod tests;
