// Interest extraction — which topic labels a user is associated with.
//
// Three sources contribute, each kept separate so callers can choose:
//   authored:   topics of posts the user wrote
//   interacted: topics of posts the user liked (post likes only) or commented on
//   friends:    topics of posts the user's accepted friends wrote
//
// A user's personal interests are authored + interacted. Friend topics are
// only mixed in where the caller asks for them (post personalization).
//
// Every sub-source fails soft: a repository error is logged and that
// sub-source contributes nothing, so one broken query degrades the result
// instead of failing the request.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::db::models::{LikeKind, Post, PostId, UserId};
use crate::db::SignalSource;

/// The three interest subsets for one user, assembled fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterestProfile {
    pub authored: BTreeSet<String>,
    pub interacted: BTreeSet<String>,
    pub friends: BTreeSet<String>,
}

impl InterestProfile {
    /// Authored + interacted topics. Never includes friend-only topics.
    pub fn personal(&self) -> BTreeSet<String> {
        self.authored.union(&self.interacted).cloned().collect()
    }

    /// All three subsets.
    pub fn combined(&self) -> BTreeSet<String> {
        let mut all = self.personal();
        all.extend(self.friends.iter().cloned());
        all
    }

    pub fn is_empty(&self) -> bool {
        self.authored.is_empty() && self.interacted.is_empty() && self.friends.is_empty()
    }
}

/// Union of topic labels across a set of posts.
pub fn topics_of(posts: &[Post]) -> BTreeSet<String> {
    posts.iter().flat_map(|p| p.topics.iter().cloned()).collect()
}

/// Posts the user authored. Empty on repository failure.
pub async fn authored_posts(source: &dyn SignalSource, user_id: UserId) -> Vec<Post> {
    match source.posts_authored_by(user_id).await {
        Ok(posts) => posts,
        Err(e) => {
            warn!(user_id, error = %e, "Failed to load authored posts, skipping");
            Vec::new()
        }
    }
}

/// Posts the user liked (post likes) or commented on, deduplicated by id.
///
/// Likes and comments are fetched independently; if one query fails the
/// other still contributes.
pub async fn engaged_posts(source: &dyn SignalSource, user_id: UserId) -> Vec<Post> {
    let mut posts = match source.posts_liked_by(user_id, LikeKind::Post).await {
        Ok(posts) => posts,
        Err(e) => {
            warn!(user_id, error = %e, "Failed to load liked posts, skipping");
            Vec::new()
        }
    };

    match source.posts_commented_by(user_id).await {
        Ok(commented) => posts.extend(commented),
        Err(e) => warn!(user_id, error = %e, "Failed to load commented posts, skipping"),
    }

    let mut seen: HashSet<PostId> = HashSet::new();
    posts.retain(|p| seen.insert(p.id));
    posts
}

pub async fn authored_topics(source: &dyn SignalSource, user_id: UserId) -> BTreeSet<String> {
    topics_of(&authored_posts(source, user_id).await)
}

pub async fn interacted_topics(source: &dyn SignalSource, user_id: UserId) -> BTreeSet<String> {
    topics_of(&engaged_posts(source, user_id).await)
}

/// Topics the user's accepted friends have authored posts about.
pub async fn friend_topics(source: &dyn SignalSource, user_id: UserId) -> BTreeSet<String> {
    let friends = match source.friends_of(user_id).await {
        Ok(friends) => friends,
        Err(e) => {
            warn!(user_id, error = %e, "Failed to load friends, skipping friend topics");
            return BTreeSet::new();
        }
    };

    let mut topics = BTreeSet::new();
    for friend in &friends {
        match source.posts_authored_by(friend.id).await {
            Ok(posts) => topics.extend(topics_of(&posts)),
            Err(e) => {
                warn!(user_id, friend_id = friend.id, error = %e, "Failed to load friend's posts, skipping");
            }
        }
    }
    topics
}

/// A user's personal interests: authored + interacted topics.
pub async fn interests_of(source: &dyn SignalSource, user_id: UserId) -> BTreeSet<String> {
    let mut topics = authored_topics(source, user_id).await;
    topics.extend(interacted_topics(source, user_id).await);
    debug!(user_id, topics = topics.len(), "Extracted personal interests");
    topics
}

/// All three interest subsets, kept separate.
pub async fn interest_profile(source: &dyn SignalSource, user_id: UserId) -> InterestProfile {
    let profile = InterestProfile {
        authored: authored_topics(source, user_id).await,
        interacted: interacted_topics(source, user_id).await,
        friends: friend_topics(source, user_id).await,
    };
    debug!(
        user_id,
        authored = profile.authored.len(),
        interacted = profile.interacted.len(),
        friends = profile.friends.len(),
        "Built interest profile"
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_personal_excludes_friend_topics() {
        let profile = InterestProfile {
            authored: set(&["rust"]),
            interacted: set(&["golang"]),
            friends: set(&["cooking"]),
        };
        assert_eq!(profile.personal(), set(&["golang", "rust"]));
        assert_eq!(profile.combined(), set(&["cooking", "golang", "rust"]));
    }

    #[test]
    fn test_empty_profile() {
        let profile = InterestProfile::default();
        assert!(profile.is_empty());
        assert!(profile.personal().is_empty());
    }
}
