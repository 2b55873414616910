use async_trait::async_trait;
use tracing::info;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::incoming::use_cases::{
    DeleteUserError, DeleteUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    StoreTransaction, UserRepository, UserStore,
};

#[derive(Debug, Clone)]
pub struct DeleteUserService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> DeleteUserService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> DeleteUserUseCase for DeleteUserService<S>
where
    S: UserStore,
{
    async fn execute(&self, user_id: UserId) -> Result<(), DeleteUserError> {
        let tx = self.store.begin().await?;
        tx.delete_user(user_id).await?;
        tx.commit().await?;

        info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
