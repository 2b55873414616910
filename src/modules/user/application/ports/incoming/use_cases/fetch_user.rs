use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{User, UserId};
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for FetchUserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserNotFound => FetchUserError::UserNotFound,
            other => FetchUserError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait FetchUserUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<User, FetchUserError>;
}
