use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

use super::state::DirectoryState;
use crate::modules::user::application::domain::entities::{
    Message, MessageId, NewMessage, NewUser, User, UserId,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, MessageRepository, RepositoryError, StoreTransaction, UserRepository,
    UserStore,
};

/// Process-local user store.
///
/// Transactions are serialized: each one holds the write lock from `begin`
/// until it is committed or dropped. Opening a second transaction on a task
/// that still holds one waits forever.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, RepositoryError> {
        let guard = Arc::clone(&self.state).write_owned().await;
        let snapshot = guard.clone();

        Ok(InMemoryTransaction {
            state: Mutex::new(guard),
            snapshot: Some(snapshot),
        })
    }
}

pub struct InMemoryTransaction {
    state: Mutex<OwnedRwLockWriteGuard<DirectoryState>>,
    // None once committed
    snapshot: Option<DirectoryState>,
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            **self.state.get_mut() = snapshot;
            debug!("In-memory transaction rolled back");
        }
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn commit(mut self) -> Result<(), RepositoryError> {
        self.snapshot = None;
        debug!("In-memory transaction committed");
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        // Drop restores the snapshot.
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.state.lock().await.insert_user(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.lock().await.user(user_id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.lock().await.user_by_username(username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.lock().await.user_by_email(email))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), RepositoryError> {
        self.state.lock().await.remove_user(user_id)
    }
}

#[async_trait]
impl FollowRepository for InMemoryTransaction {
    async fn add_follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), RepositoryError> {
        self.state.lock().await.follow(follower, followed)
    }

    async fn remove_follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), RepositoryError> {
        self.state.lock().await.unfollow(follower, followed);
        Ok(())
    }

    async fn is_following(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.is_following(follower, followed))
    }

    async fn following_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError> {
        Ok(self.state.lock().await.following_of(user_id))
    }

    async fn followers_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError> {
        Ok(self.state.lock().await.followers_of(user_id))
    }
}

#[async_trait]
impl MessageRepository for InMemoryTransaction {
    async fn create_message(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        self.state.lock().await.insert_message(message)
    }

    async fn find_message(
        &self,
        message_id: MessageId,
    ) -> Result<Option<Message>, RepositoryError> {
        Ok(self.state.lock().await.message(message_id))
    }

    async fn messages_of(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.state.lock().await.messages_of(user_id))
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RepositoryError> {
        self.state.lock().await.remove_message(message_id)
    }
}
