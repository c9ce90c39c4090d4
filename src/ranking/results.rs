// Result records — what a ranking pass hands back to the caller.
//
// Created during one request and discarded once the response is built.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use serde::Serialize;

use crate::db::models::{Group, Post, User};
use crate::scoring::post::PostScore;

/// Which rule admitted a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    InterestBased,
    MutualFriendsBased,
    RecentInteractionsBased,
    /// Group admitted because friends are members
    MutualFriends,
    /// Group admitted on member count alone
    Popular,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::InterestBased => "INTEREST_BASED",
            RecommendationType::MutualFriendsBased => "MUTUAL_FRIENDS_BASED",
            RecommendationType::RecentInteractionsBased => "RECENT_INTERACTIONS_BASED",
            RecommendationType::MutualFriends => "MUTUAL_FRIENDS",
            RecommendationType::Popular => "POPULAR",
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked post with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPost {
    pub post: Post,
    pub score: f64,
    pub reason: Option<String>,
    /// Component scores (personalized feed only)
    pub breakdown: Option<PostScore>,
}

/// A suggested connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecommendation {
    pub user: User,
    /// Strategy-local ranking score; not comparable across strategies
    pub score: f64,
    pub reason: String,
    pub recommendation_type: RecommendationType,
    pub common_topics: BTreeSet<String>,
    pub mutual_friend_count: usize,
    pub common_interaction_count: usize,
    /// Likes + comments the candidate left on the requester's posts
    pub interaction_count: usize,
}

/// A suggested group. Groups are filtered and explained, not scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecommendation {
    pub group: Group,
    pub reason: String,
    pub recommendation_type: RecommendationType,
    pub common_topics: BTreeSet<String>,
    pub has_friends: bool,
    pub member_count: u64,
}

/// Stable sort by descending score. Equal scores keep their input order.
pub fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

/// Keep only the first item for each key, preserving order.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
