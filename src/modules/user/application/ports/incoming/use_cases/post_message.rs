use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{Message, UserId, MESSAGE_MAX_CHARS};
use crate::modules::user::application::ports::outgoing::RepositoryError;

//
// ──────────────────────────────────────────────────────────
// Post Message Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    author: UserId,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostMessageCommandError {
    #[error("Message text cannot be empty")]
    EmptyText,

    #[error("Message text exceeds 140 characters")]
    TextTooLong,
}

impl PostMessageCommand {
    pub fn new(author: UserId, text: impl Into<String>) -> Result<Self, PostMessageCommandError> {
        let text = text.into();
        let text = text.trim();

        if text.is_empty() {
            return Err(PostMessageCommandError::EmptyText);
        }

        if text.chars().count() > MESSAGE_MAX_CHARS {
            return Err(PostMessageCommandError::TextTooLong);
        }

        Ok(Self {
            author,
            text: text.to_string(),
        })
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostMessageError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for PostMessageError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserNotFound => PostMessageError::UserNotFound,
            other => PostMessageError::RepositoryError(other.to_string()),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait PostMessageUseCase: Send + Sync {
    async fn execute(&self, command: PostMessageCommand) -> Result<Message, PostMessageError>;
}
