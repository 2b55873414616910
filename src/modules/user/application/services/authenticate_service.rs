use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::modules::user::application::domain::entities::User;
use crate::modules::user::application::ports::incoming::use_cases::{
    AuthenticateCommand, AuthenticateError, AuthenticateUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    HashError, PasswordHasher, StoreTransaction, UserRepository, UserStore,
};

#[derive(Clone)]
pub struct AuthenticateService<S>
where
    S: UserStore,
{
    store: S,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<S> AuthenticateService<S>
where
    S: UserStore,
{
    pub fn new(store: S, hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl<S> AuthenticateUseCase for AuthenticateService<S>
where
    S: UserStore,
{
    async fn execute(
        &self,
        command: AuthenticateCommand,
    ) -> Result<Option<User>, AuthenticateError> {
        let tx = self.store.begin().await?;
        let user = tx.find_by_username(command.normalized_username()).await?;
        // release the store before the slow hash check
        tx.commit().await?;

        let Some(user) = user else {
            info!(username = %command.username, "Authentication failed: unknown username");
            return Ok(None);
        };

        match self
            .hasher
            .verify_password(&command.password, &user.password_hash)
            .await
        {
            Ok(true) => {
                info!(user_id = %user.id, "User authenticated");
                Ok(Some(user))
            }
            Ok(false) => {
                info!(user_id = %user.id, "Authentication failed: wrong password");
                Ok(None)
            }
            Err(HashError::VerifyFailed) => {
                warn!(user_id = %user.id, "Stored password hash could not be parsed");
                Ok(None)
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Password verification failed");
                Err(AuthenticateError::HashingFailed)
            }
        }
    }
}
