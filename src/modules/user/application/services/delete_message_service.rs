use async_trait::async_trait;
use tracing::{info, warn};

use crate::modules::user::application::domain::entities::{MessageId, UserId};
use crate::modules::user::application::ports::incoming::use_cases::{
    DeleteMessageError, DeleteMessageUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    MessageRepository, StoreTransaction, UserStore,
};

#[derive(Debug, Clone)]
pub struct DeleteMessageService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> DeleteMessageService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> DeleteMessageUseCase for DeleteMessageService<S>
where
    S: UserStore,
{
    async fn execute(
        &self,
        user_id: UserId,
        message_id: MessageId,
    ) -> Result<(), DeleteMessageError> {
        let tx = self.store.begin().await?;

        let owned = tx
            .find_message(message_id)
            .await?
            .is_some_and(|message| message.user_id == user_id);

        if !owned {
            warn!(
                user_id = %user_id,
                message_id = message_id.value(),
                "Message delete rejected: not found for user"
            );
            return Err(DeleteMessageError::MessageNotFound);
        }

        tx.delete_message(message_id).await?;
        tx.commit().await?;

        info!(user_id = %user_id, message_id = message_id.value(), "Message deleted");

        Ok(())
    }
}
