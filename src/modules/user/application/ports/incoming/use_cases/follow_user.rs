use async_trait::async_trait;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FollowUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("A user cannot follow themselves")]
    CannotFollowSelf,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for FollowUserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserNotFound => FollowUserError::UserNotFound,
            other => FollowUserError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait FollowUserUseCase: Send + Sync {
    /// Add the edge `follower -> followed`. Following twice is a no-op.
    async fn execute(&self, follower: UserId, followed: UserId) -> Result<(), FollowUserError>;
}
