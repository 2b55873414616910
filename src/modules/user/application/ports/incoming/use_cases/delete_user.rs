use async_trait::async_trait;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for DeleteUserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserNotFound => DeleteUserError::UserNotFound,
            other => DeleteUserError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait DeleteUserUseCase: Send + Sync {
    /// Remove the user together with its messages and follow edges.
    async fn execute(&self, user_id: UserId) -> Result<(), DeleteUserError>;
}
