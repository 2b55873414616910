use async_trait::async_trait;
use serde::Serialize;

use crate::modules::user::application::domain::entities::UserId;
use crate::modules::user::application::ports::outgoing::RepositoryError;

/// Relation between `user` and `other`, seen from `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowStatus {
    pub is_following: bool,
    pub is_followed_by: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FollowStatusError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for FollowStatusError {
    fn from(err: RepositoryError) -> Self {
        FollowStatusError::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait FollowStatusUseCase: Send + Sync {
    async fn execute(&self, user: UserId, other: UserId) -> Result<FollowStatus, FollowStatusError>;
}
