use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Utc;

use crate::modules::user::application::domain::entities::{
    Message, MessageId, NewMessage, NewUser, User, UserId,
};
use crate::modules::user::application::domain::follow_graph::FollowGraph;
use crate::modules::user::application::ports::outgoing::{RepositoryError, UniqueField};

/// Whole directory held in memory. Users are stored without relations;
/// lookups hydrate them from the follow graph and the message table.
#[derive(Debug, Clone, Default)]
pub(crate) struct DirectoryState {
    users: BTreeMap<UserId, User>,
    usernames: HashMap<String, UserId>,
    emails: HashMap<String, UserId>,
    graph: FollowGraph,
    messages: BTreeMap<MessageId, Message>,
    last_user_id: i32,
    last_message_id: i32,
}

impl DirectoryState {
    pub(crate) fn insert_user(&mut self, new_user: NewUser) -> Result<User, RepositoryError> {
        if self.usernames.contains_key(&new_user.username) {
            return Err(RepositoryError::UniqueViolation(UniqueField::Username));
        }
        if self.emails.contains_key(&new_user.email) {
            return Err(RepositoryError::UniqueViolation(UniqueField::Email));
        }

        self.last_user_id += 1;
        let id = UserId::from(self.last_user_id);

        let user = User {
            image_url: new_user.image_url,
            header_image_url: new_user.header_image_url,
            created_at: Utc::now(),
            ..User::new(id, new_user.username, new_user.email, new_user.password_hash)
        };

        self.usernames.insert(user.username.clone(), id);
        self.emails.insert(user.email.clone(), id);
        self.users.insert(id, user.clone());

        Ok(user)
    }

    pub(crate) fn user(&self, user_id: UserId) -> Option<User> {
        self.users.get(&user_id).map(|user| self.hydrate(user))
    }

    pub(crate) fn user_by_username(&self, username: &str) -> Option<User> {
        self.usernames
            .get(username)
            .and_then(|id| self.user(*id))
    }

    pub(crate) fn user_by_email(&self, email: &str) -> Option<User> {
        self.emails.get(email).and_then(|id| self.user(*id))
    }

    pub(crate) fn remove_user(&mut self, user_id: UserId) -> Result<(), RepositoryError> {
        let user = self
            .users
            .remove(&user_id)
            .ok_or(RepositoryError::UserNotFound)?;

        self.usernames.remove(&user.username);
        self.emails.remove(&user.email);
        self.graph.remove_user(user_id);
        self.messages.retain(|_, message| message.user_id != user_id);

        Ok(())
    }

    pub(crate) fn follow(&mut self, follower: UserId, followed: UserId) -> Result<(), RepositoryError> {
        if !self.users.contains_key(&follower) || !self.users.contains_key(&followed) {
            return Err(RepositoryError::UserNotFound);
        }
        self.graph.follow(follower, followed);
        Ok(())
    }

    pub(crate) fn unfollow(&mut self, follower: UserId, followed: UserId) {
        self.graph.unfollow(follower, followed);
    }

    pub(crate) fn is_following(&self, follower: UserId, followed: UserId) -> bool {
        self.graph.is_following(follower, followed)
    }

    pub(crate) fn following_of(&self, user_id: UserId) -> BTreeSet<UserId> {
        self.graph.following_of(user_id)
    }

    pub(crate) fn followers_of(&self, user_id: UserId) -> BTreeSet<UserId> {
        self.graph.followers_of(user_id)
    }

    pub(crate) fn insert_message(&mut self, message: NewMessage) -> Result<Message, RepositoryError> {
        if !self.users.contains_key(&message.user_id) {
            return Err(RepositoryError::UserNotFound);
        }

        self.last_message_id += 1;
        let message = Message {
            id: MessageId::from(self.last_message_id),
            text: message.text,
            timestamp: message.timestamp,
            user_id: message.user_id,
        };
        self.messages.insert(message.id, message.clone());

        Ok(message)
    }

    pub(crate) fn message(&self, message_id: MessageId) -> Option<Message> {
        self.messages.get(&message_id).cloned()
    }

    pub(crate) fn messages_of(&self, user_id: UserId) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .messages
            .values()
            .filter(|message| message.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        messages
    }

    pub(crate) fn remove_message(&mut self, message_id: MessageId) -> Result<(), RepositoryError> {
        self.messages
            .remove(&message_id)
            .map(|_| ())
            .ok_or(RepositoryError::MessageNotFound)
    }

    fn hydrate(&self, user: &User) -> User {
        User {
            messages: self.messages_of(user.id),
            following: self.graph.following_of(user.id),
            followers: self.graph.followers_of(user.id),
            ..user.clone()
        }
    }
}
