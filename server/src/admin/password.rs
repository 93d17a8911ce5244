//! Argon2 password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) with a random salt. Hashing is
//! CPU-heavy, so both functions run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::AdminError;

pub async fn hash_password(password: &str) -> Result<String, AdminError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AdminError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| AdminError::Hash(format!("hashing task failed: {e}")))?
}

/// `false` for a wrong password and for a malformed stored hash alike.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || match PasswordHash::new(&hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    })
    .await
    .unwrap_or(false)
}
