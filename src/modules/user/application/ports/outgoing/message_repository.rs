use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{Message, MessageId, NewMessage, UserId};

use super::RepositoryError;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Fails with `UserNotFound` when the author does not exist.
    async fn create_message(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    async fn find_message(&self, message_id: MessageId)
        -> Result<Option<Message>, RepositoryError>;

    /// Messages of one author, newest first.
    async fn messages_of(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError>;

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RepositoryError>;
}
