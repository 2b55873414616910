use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::modules::user::application::domain::entities::{Message, NewMessage};
use crate::modules::user::application::ports::incoming::use_cases::{
    PostMessageCommand, PostMessageError, PostMessageUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    MessageRepository, StoreTransaction, UserStore,
};

#[derive(Debug, Clone)]
pub struct PostMessageService<S>
where
    S: UserStore,
{
    store: S,
}

impl<S> PostMessageService<S>
where
    S: UserStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> PostMessageUseCase for PostMessageService<S>
where
    S: UserStore,
{
    async fn execute(&self, command: PostMessageCommand) -> Result<Message, PostMessageError> {
        let tx = self.store.begin().await?;
        let message = tx
            .create_message(NewMessage {
                text: command.text().to_string(),
                timestamp: Utc::now(),
                user_id: command.author(),
            })
            .await?;
        tx.commit().await?;

        info!(user_id = %message.user_id, message_id = message.id.value(), "Message posted");

        Ok(message)
    }
}
