//! Password hashing helpers
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use crate::errors::{DomainError, DomainResult};

pub(crate) async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("failed to hash password: {}", e)))
}

pub(crate) async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?;

    // A corrupt stored hash is treated as a mismatch
    Ok(outcome.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("hunter22", 4).await.unwrap();

        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).await.unwrap());
        assert!(!verify_password("hunter23", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_does_not_match() {
        assert!(!verify_password("hunter22", "not-a-bcrypt-hash").await.unwrap());
    }
}
