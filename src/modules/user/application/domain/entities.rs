use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

/// Longest message body accepted, in characters.
pub const MESSAGE_MAX_CHARS: usize = 140;

/// Column widths of the `users` table, in characters.
pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(i32);

impl MessageId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for MessageId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<MessageId> for i32 {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
}

/// Message accepted for storage but not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
}

/// A directory account with its relations loaded.
///
/// `following` holds the users this account follows, `followers` the users
/// following it. Both are kept by id so a `User` stays a plain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub following: BTreeSet<UserId>,
    pub followers: BTreeSet<UserId>,
}

impl User {
    /// Build a user directly, with default images and no relations.
    /// Signup is the validated path; this one is for fixtures and adapters.
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
            bio: None,
            location: None,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
            messages: Vec::new(),
            following: BTreeSet::new(),
            followers: BTreeSet::new(),
        }
    }

    /// Is this user following `other`?
    pub fn is_following(&self, other: &User) -> bool {
        self.following.contains(&other.id)
    }

    /// Is this user followed by `other`?
    pub fn is_followed_by(&self, other: &User) -> bool {
        self.followers.contains(&other.id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

/// Validated signup data holding the hashed credential. Not persisted until
/// a store transaction creates and commits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_relations() {
        let user = User::new(1, "testuser", "test@test.com", "HASHED_PASSWORD");

        assert_eq!(user.messages.len(), 0);
        assert_eq!(user.followers.len(), 0);
        assert_eq!(user.following.len(), 0);
        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(user.header_image_url, DEFAULT_HEADER_IMAGE_URL);
    }

    #[test]
    fn test_user_display() {
        let user = User::new(1, "testuser", "test@test.com", "HASHED_PASSWORD");
        assert_eq!(user.to_string(), "<User #1: testuser, test@test.com>");
    }

    #[test]
    fn test_follow_checks_are_directional() {
        let mut user1 = User::new(1, "testuser1", "user1", "1234");
        let mut user2 = User::new(2, "testuser2", "user2", "1234");

        assert!(!user1.is_followed_by(&user2));
        assert!(!user1.is_following(&user2));
        assert!(!user2.is_followed_by(&user1));
        assert!(!user2.is_following(&user1));

        user1.following.insert(user2.id);
        user2.followers.insert(user1.id);

        assert!(user1.is_following(&user2));
        assert!(user2.is_followed_by(&user1));
        assert!(!user2.is_following(&user1));
        assert!(!user1.is_followed_by(&user2));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new(7, "ghost", "ghost@test.com", "secret-hash");
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "ghost");
    }
}
