use async_trait::async_trait;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::incoming::use_cases::{
    FollowStatus, FollowStatusError, FollowStatusUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, StoreTransaction, UserStore,
};

#[derive(Debug, Clone)]
pub struct FollowStatusService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> FollowStatusService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> FollowStatusUseCase for FollowStatusService<S>
where
    S: UserStore,
{
    async fn execute(&self, user: UserId, other: UserId) -> Result<FollowStatus, FollowStatusError> {
        let tx = self.store.begin().await?;
        let is_following = tx.is_following(user, other).await?;
        let is_followed_by = tx.is_following(other, user).await?;
        tx.commit().await?;

        Ok(FollowStatus {
            is_following,
            is_followed_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::adapter::outgoing::in_memory::InMemoryUserStore;
    use crate::tests::support::{seed_follow, seed_user};

    #[tokio::test]
    async fn test_status_is_directional() {
        let store = InMemoryUserStore::new();
        let user1 = seed_user(&store, "testuser1", "user1", "hash").await;
        let user2 = seed_user(&store, "testuser2", "user2", "hash").await;
        let service = FollowStatusService::new(store.clone());

        let status = service.execute(user1.id, user2.id).await.unwrap();
        assert_eq!(
            status,
            FollowStatus {
                is_following: false,
                is_followed_by: false
            }
        );

        seed_follow(&store, user1.id, user2.id).await;

        let from_user1 = service.execute(user1.id, user2.id).await.unwrap();
        assert!(from_user1.is_following);
        assert!(!from_user1.is_followed_by);

        let from_user2 = service.execute(user2.id, user1.id).await.unwrap();
        assert!(!from_user2.is_following);
        assert!(from_user2.is_followed_by);
    }
}
