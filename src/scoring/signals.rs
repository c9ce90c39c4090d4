// Per-request signal lookup.
//
// Affinity scoring needs the same handful of facts about every candidate:
// their topics, which posts they engaged with, and who their friends are.
// SignalLookup fetches those once per user and keeps them for the rest of
// the request, so a candidate considered by two strategies costs one set
// of repository reads. The lookup is dropped with the request; nothing
// survives across calls.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;

use crate::db::models::{PostId, UserId};
use crate::db::SignalSource;
use crate::topics::interests;

/// Everything affinity scoring needs to know about one user.
#[derive(Debug, Clone, Default)]
pub struct UserSignals {
    pub user_id: UserId,
    pub authored_topics: BTreeSet<String>,
    pub interacted_topics: BTreeSet<String>,
    /// Posts the user liked or commented on, mapped to their author
    pub engaged_posts: HashMap<PostId, UserId>,
    /// Accepted friend ids
    pub friends: HashSet<UserId>,
}

impl UserSignals {
    /// Authored + interacted topics.
    pub fn personal_topics(&self) -> BTreeSet<String> {
        self.authored_topics
            .union(&self.interacted_topics)
            .cloned()
            .collect()
    }

    pub fn is_friend(&self, other: UserId) -> bool {
        self.friends.contains(&other)
    }

    /// Load signals for one user.
    ///
    /// Topic and engagement reads fail soft (see `topics::interests`);
    /// a failing friend list is a hard error since every affinity signal
    /// and the candidate exclusion depend on it.
    pub async fn load(source: &dyn SignalSource, user_id: UserId) -> Result<Self> {
        let authored = interests::authored_posts(source, user_id).await;
        let engaged = interests::engaged_posts(source, user_id).await;
        let friends = source.friends_of(user_id).await?;

        Ok(Self {
            user_id,
            authored_topics: interests::topics_of(&authored),
            interacted_topics: interests::topics_of(&engaged),
            engaged_posts: engaged.iter().map(|p| (p.id, p.author_id)).collect(),
            friends: friends.iter().map(|f| f.id).collect(),
        })
    }
}

/// Lazily loaded, request-scoped map of user signals.
pub struct SignalLookup<'a> {
    source: &'a dyn SignalSource,
    loaded: HashMap<UserId, UserSignals>,
}

impl<'a> SignalLookup<'a> {
    pub fn new(source: &'a dyn SignalSource) -> Self {
        Self {
            source,
            loaded: HashMap::new(),
        }
    }

    pub async fn get(&mut self, user_id: UserId) -> Result<&UserSignals> {
        if !self.loaded.contains_key(&user_id) {
            let signals = UserSignals::load(self.source, user_id).await?;
            self.loaded.insert(user_id, signals);
        }
        Ok(&self.loaded[&user_id])
    }

    /// Number of users loaded so far in this request.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}
