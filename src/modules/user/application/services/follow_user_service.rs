use async_trait::async_trait;
use tracing::info;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::incoming::use_cases::{
    FollowUserError, FollowUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, StoreTransaction, UserStore,
};

#[derive(Debug, Clone)]
pub struct FollowUserService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> FollowUserService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> FollowUserUseCase for FollowUserService<S>
where
    S: UserStore,
{
    async fn execute(&self, follower: UserId, followed: UserId) -> Result<(), FollowUserError> {
        if follower == followed {
            return Err(FollowUserError::CannotFollowSelf);
        }

        let tx = self.store.begin().await?;
        tx.add_follow(follower, followed).await?;
        tx.commit().await?;

        info!(follower = %follower, followed = %followed, "User followed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::adapter::outgoing::in_memory::InMemoryUserStore;
    use crate::modules::user::application::ports::outgoing::UserRepository;
    use crate::tests::support::{seed_user, FailingStore};

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let store = InMemoryUserStore::new();
        let alice = seed_user(&store, "alice", "alice@test.com", "hash").await;
        let bob = seed_user(&store, "bob", "bob@test.com", "hash").await;
        let service = FollowUserService::new(store.clone());

        service.execute(alice.id, bob.id).await.unwrap();
        service.execute(alice.id, bob.id).await.unwrap();

        let tx = store.begin().await.unwrap();
        assert_eq!(tx.followers_of(bob.id).await.unwrap().len(), 1);
        let alice = tx.find_by_id(alice.id).await.unwrap().unwrap();
        let bob = tx.find_by_id(bob.id).await.unwrap().unwrap();
        assert!(alice.is_following(&bob));
        assert!(bob.is_followed_by(&alice));
        assert!(!bob.is_following(&alice));
    }

    #[tokio::test]
    async fn test_follow_unknown_user() {
        let store = InMemoryUserStore::new();
        let alice = seed_user(&store, "alice", "alice@test.com", "hash").await;
        let service = FollowUserService::new(store);

        let result = service.execute(alice.id, UserId::from(999)).await;

        assert_eq!(result, Err(FollowUserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_follow_self_is_rejected() {
        let store = InMemoryUserStore::new();
        let alice = seed_user(&store, "alice", "alice@test.com", "hash").await;
        let service = FollowUserService::new(store);

        let result = service.execute(alice.id, alice.id).await;

        assert_eq!(result, Err(FollowUserError::CannotFollowSelf));
    }

    #[tokio::test]
    async fn test_store_failure_is_repository_error() {
        let service = FollowUserService::new(FailingStore);

        let result = service.execute(UserId::from(1), UserId::from(2)).await;

        assert!(matches!(result, Err(FollowUserError::RepositoryError(_))));
    }
}
