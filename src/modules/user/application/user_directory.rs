use std::sync::Arc;

use crate::config::{ConfigError, DirectoryConfig};
use crate::modules::user::adapter::outgoing::security::hasher_from_config;
use crate::modules::user::application::ports::incoming::use_cases::{
    AuthenticateUseCase, DeleteMessageUseCase, DeleteUserUseCase, FetchUserUseCase,
    FollowStatusUseCase, FollowUserUseCase, PostMessageUseCase, SignupUseCase,
    UnfollowUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{PasswordHasher, UserStore};
use crate::modules::user::application::services::{
    AuthenticateService, DeleteMessageService, DeleteUserService, FetchUserService,
    FollowStatusService, FollowUserService, PostMessageService, SignupService,
    UnfollowUserService,
};

/// Every user directory operation, wired against one store and one hasher.
#[derive(Clone)]
pub struct UserDirectory {
    pub signup: Arc<dyn SignupUseCase + Send + Sync>,
    pub authenticate: Arc<dyn AuthenticateUseCase + Send + Sync>,
    pub fetch_user: Arc<dyn FetchUserUseCase + Send + Sync>,
    pub delete_user: Arc<dyn DeleteUserUseCase + Send + Sync>,
    pub follow: Arc<dyn FollowUserUseCase + Send + Sync>,
    pub unfollow: Arc<dyn UnfollowUserUseCase + Send + Sync>,
    pub follow_status: Arc<dyn FollowStatusUseCase + Send + Sync>,
    pub post_message: Arc<dyn PostMessageUseCase + Send + Sync>,
    pub delete_message: Arc<dyn DeleteMessageUseCase + Send + Sync>,
}

impl UserDirectory {
    pub fn new<S>(store: S, hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self
    where
        S: UserStore + Clone + 'static,
    {
        Self::build(store, hasher, &DirectoryConfig::default())
    }

    /// Wire the directory with the configured hasher and image defaults.
    pub fn from_config<S>(store: S, config: &DirectoryConfig) -> Result<Self, ConfigError>
    where
        S: UserStore + Clone + 'static,
    {
        let hasher = hasher_from_config(&config.hashing)?;
        Ok(Self::build(store, hasher, config))
    }

    fn build<S>(
        store: S,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        config: &DirectoryConfig,
    ) -> Self
    where
        S: UserStore + Clone + 'static,
    {
        Self {
            signup: Arc::new(
                SignupService::new(store.clone(), Arc::clone(&hasher)).with_config(config),
            ),
            authenticate: Arc::new(AuthenticateService::new(store.clone(), hasher)),
            fetch_user: Arc::new(FetchUserService::new(store.clone())),
            delete_user: Arc::new(DeleteUserService::new(store.clone())),
            follow: Arc::new(FollowUserService::new(store.clone())),
            unfollow: Arc::new(UnfollowUserService::new(store.clone())),
            follow_status: Arc::new(FollowStatusService::new(store.clone())),
            post_message: Arc::new(PostMessageService::new(store.clone())),
            delete_message: Arc::new(DeleteMessageService::new(store)),
        }
    }
}
