//! Dashboard administrator accounts.
//!
//! Passwords are only ever stored as Argon2 hashes (see [`password`]). The
//! default account is created by an explicit [`AdminService::provision_default`]
//! call at startup rather than as a side effect of opening the store.

mod password;

use crate::persistence::traits::AdminRepository;
use crate::persistence::{now_timestamp, AdminAccount, PersistenceError};

use password::{hash_password, verify_password};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

pub struct AdminService<R> {
    repo: R,
}

impl<R: AdminRepository> AdminService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create the default administrator unless an account with this username
    /// already exists. Safe to call on every startup. Returns `true` when an
    /// account was created.
    pub async fn provision_default(&self, username: &str, password: &str) -> Result<bool, AdminError> {
        if self.repo.find_by_username(username).await?.is_some() {
            tracing::debug!(username, "Default admin already present");
            return Ok(false);
        }

        match self.create(username, password).await {
            Ok(_) => {
                tracing::info!(username, "Default admin created");
                Ok(true)
            }
            // Another process provisioned it between our lookup and insert.
            Err(AdminError::Persistence(PersistenceError::DuplicateUsername(_))) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check credentials. Unknown usernames and wrong passwords both yield `None`.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminAccount>, AdminError> {
        let Some(stored) = self.repo.find_by_username(username).await? else {
            tracing::info!("Login rejected: unknown user");
            return Ok(None);
        };

        if verify_password(password, &stored.password_hash).await {
            tracing::info!(admin_id = stored.account.id, "Login accepted");
            Ok(Some(stored.account))
        } else {
            tracing::info!(admin_id = stored.account.id, "Login rejected: wrong password");
            Ok(None)
        }
    }

    pub async fn list(&self) -> Result<Vec<AdminAccount>, AdminError> {
        Ok(self.repo.list_admins().await?)
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn create(&self, username: &str, password: &str) -> Result<AdminAccount, AdminError> {
        let hash = hash_password(password).await?;
        let account = self
            .repo
            .insert_admin(username, &hash, now_timestamp())
            .await?;
        tracing::info!(admin_id = account.id, "Admin created");
        Ok(account)
    }

    /// Delete an administrator. Unknown ids are a no-op.
    pub async fn remove(&self, id: i64) -> Result<(), AdminError> {
        self.repo.delete_admin(id).await?;
        tracing::info!(admin_id = id, "Admin removed");
        Ok(())
    }

    /// Replace an administrator's password. Returns `false` for unknown ids.
    #[tracing::instrument(skip(self, password))]
    pub async fn change_password(&self, id: i64, password: &str) -> Result<bool, AdminError> {
        let hash = hash_password(password).await?;
        Ok(self.repo.update_password(id, &hash).await?)
    }
}
