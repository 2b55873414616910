use async_trait::async_trait;
use tracing::info;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::incoming::use_cases::{
    UnfollowUserError, UnfollowUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, StoreTransaction, UserStore,
};

#[derive(Debug, Clone)]
pub struct UnfollowUserService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> UnfollowUserService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UnfollowUserUseCase for UnfollowUserService<S>
where
    S: UserStore,
{
    async fn execute(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), UnfollowUserError> {
        let tx = self.store.begin().await?;
        tx.remove_follow(follower, followed).await?;
        tx.commit().await?;

        info!(follower = %follower, followed = %followed, "User unfollowed");

        Ok(())
    }
}
