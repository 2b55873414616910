use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::modules::user::application::domain::entities::UserId;

use super::RepositoryError;

//
// ──────────────────────────────────────────────────────────
// Port (follows join table only)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Add the edge `follower → followed`. Idempotent: an existing edge is
    /// success. Fails with `UserNotFound` when either end does not exist.
    async fn add_follow(&self, follower: UserId, followed: UserId)
        -> Result<(), RepositoryError>;

    /// Remove the edge `follower → followed`. Idempotent.
    async fn remove_follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), RepositoryError>;

    async fn is_following(&self, follower: UserId, followed: UserId)
        -> Result<bool, RepositoryError>;

    async fn following_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError>;

    async fn followers_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError>;
}
