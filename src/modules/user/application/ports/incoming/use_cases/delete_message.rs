use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{MessageId, UserId};
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteMessageError {
    #[error("Message not found")]
    MessageNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for DeleteMessageError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::MessageNotFound => DeleteMessageError::MessageNotFound,
            other => DeleteMessageError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait DeleteMessageUseCase: Send + Sync {
    /// Messages owned by someone else are reported as not found.
    async fn execute(&self, user_id: UserId, message_id: MessageId)
        -> Result<(), DeleteMessageError>;
}
