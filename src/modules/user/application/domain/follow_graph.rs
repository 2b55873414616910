use std::collections::{BTreeSet, HashMap};

use super::entities::UserId;

/// Directed follow edges indexed from both ends.
///
/// `following[a]` contains `b` iff `followers[b]` contains `a`. Empty sets
/// are pruned so a user without edges has no entry in either map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowGraph {
    following: HashMap<UserId, BTreeSet<UserId>>,
    followers: HashMap<UserId, BTreeSet<UserId>>,
}

impl FollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the edge already existed.
    pub fn follow(&mut self, follower: UserId, followed: UserId) -> bool {
        let inserted = self.following.entry(follower).or_default().insert(followed);
        self.followers.entry(followed).or_default().insert(follower);
        inserted
    }

    /// Returns `false` when there was no edge to remove.
    pub fn unfollow(&mut self, follower: UserId, followed: UserId) -> bool {
        let removed = Self::detach(&mut self.following, follower, followed);
        Self::detach(&mut self.followers, followed, follower);
        removed
    }

    pub fn is_following(&self, follower: UserId, followed: UserId) -> bool {
        self.following
            .get(&follower)
            .is_some_and(|set| set.contains(&followed))
    }

    pub fn is_followed_by(&self, followed: UserId, follower: UserId) -> bool {
        self.is_following(follower, followed)
    }

    pub fn following_of(&self, user: UserId) -> BTreeSet<UserId> {
        self.following.get(&user).cloned().unwrap_or_default()
    }

    pub fn followers_of(&self, user: UserId) -> BTreeSet<UserId> {
        self.followers.get(&user).cloned().unwrap_or_default()
    }

    /// Drop every edge touching `user`. Returns how many edges went away.
    pub fn remove_user(&mut self, user: UserId) -> usize {
        let mut removed = 0;

        if let Some(targets) = self.following.remove(&user) {
            for target in targets {
                Self::detach(&mut self.followers, target, user);
                removed += 1;
            }
        }

        if let Some(sources) = self.followers.remove(&user) {
            for source in sources {
                if Self::detach(&mut self.following, source, user) {
                    removed += 1;
                }
            }
        }

        removed
    }

    pub fn edge_count(&self) -> usize {
        self.following.values().map(BTreeSet::len).sum()
    }

    fn detach(index: &mut HashMap<UserId, BTreeSet<UserId>>, key: UserId, value: UserId) -> bool {
        let Some(set) = index.get_mut(&key) else {
            return false;
        };
        let removed = set.remove(&value);
        if set.is_empty() {
            index.remove(&key);
        }
        removed
    }
}
