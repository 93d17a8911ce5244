//! SQLite-backed repository for dashboard administrators.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::helpers::{decode_timestamp, encode_timestamp};
use crate::persistence::traits::AdminRepository;
use crate::persistence::{AdminAccount, PersistenceError, StoredAdmin};

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: i64,
}

impl AdminRow {
    fn into_stored(self) -> Result<StoredAdmin, PersistenceError> {
        Ok(StoredAdmin {
            account: AdminAccount {
                id: self.id,
                username: self.username,
                created_at: decode_timestamp(self.created_at)?,
            },
            password_hash: self.password_hash,
        })
    }
}

/// SQLite implementation of [`AdminRepository`].
pub struct SqliteAdminRepository {
    pool: SqlitePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for SqliteAdminRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredAdmin>, PersistenceError> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AdminRow::into_stored).transpose()
    }

    async fn list_admins(&self) -> Result<Vec<AdminAccount>, PersistenceError> {
        let rows: Vec<AdminRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM admins ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| r.into_stored().map(|stored| stored.account))
            .collect()
    }

    async fn insert_admin(
        &self,
        username: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<AdminAccount, PersistenceError> {
        let created_at_secs = encode_timestamp(created_at);

        let result = sqlx::query(
            "INSERT INTO admins (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(created_at_secs)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                PersistenceError::DuplicateUsername(username.to_string())
            }
            other => PersistenceError::Database(other),
        })?;

        Ok(AdminAccount {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            created_at: decode_timestamp(created_at_secs)?,
        })
    }

    async fn delete_admin(&self, id: i64) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
