use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{User, UserId};
use crate::modules::user::application::ports::incoming::use_cases::{
    FetchUserError, FetchUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    StoreTransaction, UserRepository, UserStore,
};

#[derive(Debug, Clone)]
pub struct FetchUserService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> FetchUserService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> FetchUserUseCase for FetchUserService<S>
where
    S: UserStore,
{
    async fn execute(&self, user_id: UserId) -> Result<User, FetchUserError> {
        let tx = self.store.begin().await?;
        let user = tx.find_by_id(user_id).await?;
        tx.commit().await?;

        user.ok_or(FetchUserError::UserNotFound)
    }
}
