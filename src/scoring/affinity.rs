// User affinity — how much two users have in common.
//
// Three independent signals:
// - common topics: overlap of the two users' personal (authored + interacted) topics
// - mutual friends: accepted friends both users share
// - common interactions: posts both users liked or commented on, not counting
//   posts either of them wrote (shared third-party engagement)

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;

use super::signals::UserSignals;
use crate::db::models::UserId;
use crate::db::SignalSource;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Affinity {
    pub common_topics: BTreeSet<String>,
    pub mutual_friend_count: usize,
    pub common_interaction_count: usize,
}

impl Affinity {
    /// Whether the interest-based strategy would admit this candidate.
    pub fn has_shared_interest(&self) -> bool {
        !self.common_topics.is_empty() || self.common_interaction_count > 0
    }
}

/// Compute affinity from already-loaded signals.
pub fn affinity(user: &UserSignals, candidate: &UserSignals) -> Affinity {
    let common_topics = user
        .personal_topics()
        .intersection(&candidate.personal_topics())
        .cloned()
        .collect();

    let mutual_friend_count = user.friends.intersection(&candidate.friends).count();

    let common_interaction_count = user
        .engaged_posts
        .iter()
        .filter(|(post_id, author_id)| {
            **author_id != user.user_id
                && **author_id != candidate.user_id
                && candidate.engaged_posts.contains_key(*post_id)
        })
        .count();

    Affinity {
        common_topics,
        mutual_friend_count,
        common_interaction_count,
    }
}

/// Load both users' signals and compute their affinity.
pub async fn affinity_between(
    source: &dyn SignalSource,
    user_id: UserId,
    candidate_id: UserId,
) -> Result<Affinity> {
    let user = UserSignals::load(source, user_id).await?;
    let candidate = UserSignals::load(source, candidate_id).await?;
    Ok(affinity(&user, &candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn signals(
        user_id: UserId,
        authored: &[&str],
        engaged: &[(i64, UserId)],
        friends: &[UserId],
    ) -> UserSignals {
        UserSignals {
            user_id,
            authored_topics: authored.iter().map(|t| t.to_string()).collect(),
            interacted_topics: Default::default(),
            engaged_posts: engaged.iter().copied().collect::<HashMap<_, _>>(),
            friends: friends.iter().copied().collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn test_common_topics_and_mutual_friends() {
        let a = signals(1, &["rust", "golang"], &[], &[5, 6, 7]);
        let b = signals(2, &["rust", "cooking"], &[], &[6, 7, 8]);
        let aff = affinity(&a, &b);
        assert_eq!(aff.common_topics.len(), 1);
        assert!(aff.common_topics.contains("rust"));
        assert_eq!(aff.mutual_friend_count, 2);
        assert!(aff.has_shared_interest());
    }

    #[test]
    fn test_common_interactions_exclude_own_posts() {
        // Post 100 by a third party, 101 by user 1, 102 by user 2
        let a = signals(1, &[], &[(100, 9), (101, 1), (102, 2)], &[]);
        let b = signals(2, &[], &[(100, 9), (101, 1), (102, 2)], &[]);
        let aff = affinity(&a, &b);
        assert_eq!(aff.common_interaction_count, 1);
        assert!(aff.common_topics.is_empty());
        assert!(aff.has_shared_interest());
    }

    #[test]
    fn test_no_affinity() {
        let a = signals(1, &["rust"], &[(100, 9)], &[5]);
        let b = signals(2, &["cooking"], &[(200, 9)], &[6]);
        let aff = affinity(&a, &b);
        assert_eq!(aff, Affinity::default());
        assert!(!aff.has_shared_interest());
    }
}
