use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::modules::user::adapter::outgoing::in_memory::{InMemoryTransaction, InMemoryUserStore};
use crate::modules::user::adapter::outgoing::security::Argon2Hasher;
use crate::modules::user::application::domain::entities::{
    Message, NewMessage, NewUser, User, UserId, DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, HashError, MessageRepository, PasswordHasher, RepositoryError,
    StoreTransaction, UserRepository, UserStore,
};

// ──────────────────────────────────────────────────────────
// Hashers
// ──────────────────────────────────────────────────────────

pub fn fast_hasher() -> Arc<dyn PasswordHasher + Send + Sync> {
    Arc::new(Argon2Hasher::fast())
}

mock! {
    pub Hasher {}

    #[async_trait]
    impl PasswordHasher for Hasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError>;
        async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
    }
}

// ──────────────────────────────────────────────────────────
// Stores
// ──────────────────────────────────────────────────────────

/// Store whose connection is always down.
#[derive(Debug, Clone, Copy)]
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, RepositoryError> {
        Err(RepositoryError::DatabaseError("connection refused".to_string()))
    }
}

// ──────────────────────────────────────────────────────────
// Fixtures
// ──────────────────────────────────────────────────────────

/// Insert a user with a given stored credential and commit.
pub async fn seed_user(
    store: &InMemoryUserStore,
    username: &str,
    email: &str,
    password_hash: &str,
) -> User {
    let tx = store.begin().await.unwrap();
    let user = tx
        .create_user(NewUser {
            email: email.to_string(),
            username: username.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
            password_hash: password_hash.to_string(),
        })
        .await
        .unwrap();
    tx.commit().await.unwrap();
    user
}

pub async fn seed_follow(store: &InMemoryUserStore, follower: UserId, followed: UserId) {
    let tx = store.begin().await.unwrap();
    tx.add_follow(follower, followed).await.unwrap();
    tx.commit().await.unwrap();
}

pub async fn seed_message(store: &InMemoryUserStore, author: UserId, text: &str) -> Message {
    let tx = store.begin().await.unwrap();
    let message = tx
        .create_message(NewMessage {
            text: text.to_string(),
            timestamp: Utc::now(),
            user_id: author,
        })
        .await
        .unwrap();
    tx.commit().await.unwrap();
    message
}
