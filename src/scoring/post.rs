// Post scoring — personalized relevance and trending engagement.
//
// Personalized score blends three topic-overlap components:
//
//   0.40 * authored + 0.35 * interaction + 0.25 * friends
//
// floored at 0. Trending score ignores topics entirely:
//
//   likes * 1 + comments * 2 + shares * 3
//
// In both modes a post is never a candidate for its own author, and
// reshares are never candidates in their own right.

use serde::Serialize;

use crate::db::models::{Post, UserId};
use crate::topics::interests::InterestProfile;
use crate::topics::overlap::{self, OverlapWeights};

const LIKE_WEIGHT: f64 = 1.0;
const COMMENT_WEIGHT: f64 = 2.0;
const SHARE_WEIGHT: f64 = 3.0;

/// Weights for the personalized feed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizationWeights {
    pub authored_share: f64,
    pub interaction_share: f64,
    pub friends_share: f64,
    pub authored: OverlapWeights,
    pub interaction: OverlapWeights,
    pub friends: OverlapWeights,
}

impl Default for PersonalizationWeights {
    fn default() -> Self {
        Self {
            authored_share: 0.40,
            interaction_share: 0.35,
            friends_share: 0.25,
            authored: OverlapWeights::AUTHORED,
            interaction: OverlapWeights::INTERACTION,
            friends: OverlapWeights::FRIENDS,
        }
    }
}

/// A personalized score with its component breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostScore {
    pub score: f64,
    /// Raw (unweighted) authored-overlap component
    pub authored: f64,
    /// Raw interaction-overlap component
    pub interaction: f64,
    /// Raw friends-overlap component
    pub friends: f64,
    /// Post topics that matched any of the three interest sets
    pub matched_topics: Vec<String>,
}

/// Whether a post may be ranked for this user at all.
pub fn is_rankable(post: &Post, user_id: UserId) -> bool {
    post.author_id != user_id && !post.is_reshare()
}

/// Personalized relevance of a post for a user.
///
/// Returns `None` when the post is not a candidate (own post or reshare).
/// A candidate with no topic overlap scores 0.0; the ranking layer drops it.
pub fn personalized_score(
    post: &Post,
    user_id: UserId,
    profile: &InterestProfile,
    weights: &PersonalizationWeights,
) -> Option<PostScore> {
    if !is_rankable(post, user_id) {
        return None;
    }

    let authored = overlap::overlap_score(&post.topics, &profile.authored, &weights.authored);
    let interaction =
        overlap::overlap_score(&post.topics, &profile.interacted, &weights.interaction);
    let friends = overlap::overlap_score(&post.topics, &profile.friends, &weights.friends);

    let score = (weights.authored_share * authored
        + weights.interaction_share * interaction
        + weights.friends_share * friends)
        .max(0.0);

    Some(PostScore {
        score,
        authored,
        interaction,
        friends,
        matched_topics: overlap::shared_topics(&post.topics, &profile.combined()),
    })
}

/// Engagement-based trending score. Topic-agnostic.
pub fn trending_score(post: &Post) -> f64 {
    post.like_count as f64 * LIKE_WEIGHT
        + post.comment_count as f64 * COMMENT_WEIGHT
        + post.share_count as f64 * SHARE_WEIGHT
}
