use std::sync::Arc;

use async_trait::async_trait;

use super::{Argon2Hasher, BcryptHasher};
use crate::modules::user::application::ports::outgoing::{HashError, PasswordHasher};

/// Hashes with the configured algorithm and verifies with whichever
/// algorithm produced the stored hash.
#[derive(Clone)]
pub struct PasswordHashingService {
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    argon2: Argon2Hasher,
    bcrypt: BcryptHasher,
}

impl PasswordHashingService {
    pub fn new(hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self {
        Self {
            hasher,
            argon2: Argon2Hasher::default(),
            bcrypt: BcryptHasher::default(),
        }
    }
}

#[async_trait]
impl PasswordHasher for PasswordHashingService {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        self.hasher.hash_password(password).await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        // cost parameters are read from the stored hash
        if hash.starts_with("$argon2") {
            self.argon2.verify_password(password, hash).await
        } else if hash.starts_with("$2") {
            self.bcrypt.verify_password(password, hash).await
        } else {
            Err(HashError::VerifyFailed)
        }
    }
}
