use async_trait::async_trait;

use crate::modules::user::application::domain::entities::{NewUser, User, UserId};

use super::RepositoryError;

/// Command and lookup side of the `users` table.
///
/// Lookups return users with messages, followers and following loaded.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `UniqueViolation` when the username or
    /// email is already registered.
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Delete a user together with its messages and follow edges.
    async fn delete_user(&self, user_id: UserId) -> Result<(), RepositoryError>;
}
