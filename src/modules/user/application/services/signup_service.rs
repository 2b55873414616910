use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::DirectoryConfig;
use crate::modules::user::application::domain::entities::{
    NewUser, User, DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL,
};
use crate::modules::user::application::ports::incoming::use_cases::{
    SignupCommand, SignupError, SignupUseCase, ValidationError,
};
use crate::modules::user::application::ports::outgoing::{
    PasswordHasher, StoreTransaction, UserRepository, UserStore,
};

#[derive(Clone)]
pub struct SignupService<S>
where
    S: UserStore,
{
    store: S,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    default_image_url: String,
    default_header_image_url: String,
}

impl<S> SignupService<S>
where
    S: UserStore,
{
    pub fn new(store: S, hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self {
        Self {
            store,
            hasher,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            default_header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
        }
    }

    /// Take image defaults from configuration.
    pub fn with_config(mut self, config: &DirectoryConfig) -> Self {
        self.default_image_url = config.default_image_url.clone();
        self.default_header_image_url = config.default_header_image_url.clone();
        self
    }
}

#[async_trait]
impl<S> SignupUseCase for SignupService<S>
where
    S: UserStore,
{
    async fn prepare(&self, command: SignupCommand) -> Result<NewUser, SignupError> {
        let fields = command.fields()?;

        let password_hash = self.hasher.hash_password(fields.password).await?;

        Ok(NewUser {
            email: fields.email.to_string(),
            username: fields.username.to_string(),
            image_url: fields
                .image_url
                .unwrap_or(&self.default_image_url)
                .to_string(),
            header_image_url: self.default_header_image_url.clone(),
            password_hash,
        })
    }

    async fn execute(&self, command: SignupCommand) -> Result<User, SignupError> {
        let new_user = self.prepare(command).await?;

        let tx = self.store.begin().await?;

        if tx.find_by_username(&new_user.username).await?.is_some() {
            warn!(username = %new_user.username, "Signup rejected: username taken");
            return Err(ValidationError::UsernameTaken.into());
        }
        if tx.find_by_email(&new_user.email).await?.is_some() {
            warn!(username = %new_user.username, "Signup rejected: email taken");
            return Err(ValidationError::EmailTaken.into());
        }

        let user = tx.create_user(new_user).await?;
        tx.commit().await?;

        info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(user)
    }
}
