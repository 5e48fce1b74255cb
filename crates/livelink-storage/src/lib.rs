pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use config::{KEEP_JOURNAL_MODE, StorageConfig};
pub use error::StorageError;
pub use gateway::SqliteGateway;
