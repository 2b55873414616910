// src/modules/user/application/ports/outgoing/store.rs
use std::fmt;

use async_trait::async_trait;

use super::{FollowRepository, MessageRepository, UserRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => write!(f, "username"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated on {0}")]
    UniqueViolation(UniqueField),

    #[error("User not found")]
    UserNotFound,

    #[error("Message not found")]
    MessageNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Transaction scope
// ──────────────────────────────────────────────────────────
//

/// Entry point to a user store. All repository access goes through a
/// transaction obtained here.
#[async_trait]
pub trait UserStore: Send + Sync {
    type Transaction: StoreTransaction;

    async fn begin(&self) -> Result<Self::Transaction, RepositoryError>;
}

/// An open unit of work over users, follows and messages.
///
/// Writes become visible to other transactions only after `commit`.
/// Dropping the transaction without committing rolls it back.
#[async_trait]
pub trait StoreTransaction:
    UserRepository + FollowRepository + MessageRepository + Send + Sync + Sized
{
    async fn commit(self) -> Result<(), RepositoryError>;

    async fn rollback(self) -> Result<(), RepositoryError>;
}
