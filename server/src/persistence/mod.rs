pub mod sqlite;
pub mod traits;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Stored row is invalid: {0}")]
    InvalidRow(String),
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
}

/// A dashboard administrator as exposed outside the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// An administrator row including its password hash. Never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAdmin {
    pub account: AdminAccount,
    pub password_hash: String,
}

/// Current time truncated to whole seconds, the precision the store keeps.
pub fn now_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}
