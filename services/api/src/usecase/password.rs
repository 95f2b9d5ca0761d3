use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use anyhow::Context as _;

use crate::error::ApiError;

/// Hash a plain password with argon2id and a random salt (PHC string).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a password against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hashing task")?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, ApiError> {
    let matched = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .context("join password verification task")?;
    Ok(matched)
}
