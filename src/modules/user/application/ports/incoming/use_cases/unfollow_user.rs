use async_trait::async_trait;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnfollowUserError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for UnfollowUserError {
    fn from(err: RepositoryError) -> Self {
        UnfollowUserError::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait UnfollowUserUseCase: Send + Sync {
    /// Remove the edge `follower -> followed` if present.
    async fn execute(&self, follower: UserId, followed: UserId)
        -> Result<(), UnfollowUserError>;
}
