// Topic overlap component scoring.
//
// Compares a post's topic labels against one of the requesting user's
// interest sets. For n shared labels:
//
//   n * per_match
//   + full_match_bonus            if every post topic is shared
//   + (n - 1) * extra_match_bonus if more than one topic is shared
//
// Zero shared labels score 0.0. The personalized feed runs this three
// times (authored, interacted, friends) with different weights.

use std::collections::BTreeSet;

/// Weights for one overlap component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapWeights {
    /// Points per shared topic
    pub per_match: f64,
    /// Flat bonus when all of the post's topics are shared
    pub full_match_bonus: f64,
    /// Bonus per shared topic beyond the first
    pub extra_match_bonus: f64,
}

impl OverlapWeights {
    /// Topics the user has authored posts about: 8 / +5 / +3.
    pub const AUTHORED: OverlapWeights = OverlapWeights {
        per_match: 8.0,
        full_match_bonus: 5.0,
        extra_match_bonus: 3.0,
    };

    /// Topics the user has liked or commented on: 6 / +4 / +2.
    pub const INTERACTION: OverlapWeights = OverlapWeights {
        per_match: 6.0,
        full_match_bonus: 4.0,
        extra_match_bonus: 2.0,
    };

    /// Topics the user's friends have authored posts about: 4 / +3 / +1.5.
    pub const FRIENDS: OverlapWeights = OverlapWeights {
        per_match: 4.0,
        full_match_bonus: 3.0,
        extra_match_bonus: 1.5,
    };
}

/// Labels present in both sets, in sorted order.
pub fn shared_topics(post_topics: &BTreeSet<String>, interests: &BTreeSet<String>) -> Vec<String> {
    post_topics.intersection(interests).cloned().collect()
}

/// Score one overlap component.
pub fn overlap_score(
    post_topics: &BTreeSet<String>,
    interests: &BTreeSet<String>,
    weights: &OverlapWeights,
) -> f64 {
    let shared = post_topics.intersection(interests).count();
    if shared == 0 {
        return 0.0;
    }

    let mut score = shared as f64 * weights.per_match;
    if shared == post_topics.len() {
        score += weights.full_match_bonus;
    }
    if shared > 1 {
        score += (shared - 1) as f64 * weights.extra_match_bonus;
    }
    score
}
