// User recommendations — three strategies and their deduplicated union.
//
// - Interest-based: non-friends sharing topics or third-party engagement
// - Mutual-friends: non-friends with at least one friend in common
// - Recent interactions: anyone who liked or commented on the user's posts
//
// Combined runs them in that order, keeps the first entry per candidate,
// and truncates. Scores are strategy-local and never normalized across
// strategies.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use super::results::{dedup_by_key, sort_by_score_desc, RecommendationType, UserRecommendation};
use crate::db::models::{User, UserId};
use crate::db::SignalSource;
use crate::scoring::affinity::affinity;
use crate::scoring::signals::{SignalLookup, UserSignals};

/// Which recommendation strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationStrategy {
    InterestBased,
    MutualFriends,
    RecentInteractions,
    /// All three, interest first, deduplicated
    #[default]
    Combined,
}

impl RecommendationStrategy {
    /// Map a transport-level strategy name. Absent or unrecognized names
    /// select `Combined`.
    pub fn from_param(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return RecommendationStrategy::Combined;
        };
        let name = raw.trim().to_lowercase().replace('-', "_");
        match name.strip_suffix("_based").unwrap_or(&name) {
            "interest" | "interests" => RecommendationStrategy::InterestBased,
            "mutual_friends" | "mutual" => RecommendationStrategy::MutualFriends,
            "recent_interactions" | "recent" => RecommendationStrategy::RecentInteractions,
            _ => RecommendationStrategy::Combined,
        }
    }
}

/// Recommend users for `user_id` with the chosen strategy.
pub async fn recommend_users(
    source: &dyn SignalSource,
    user_id: UserId,
    limit: usize,
    strategy: RecommendationStrategy,
) -> Result<Vec<UserRecommendation>> {
    let users = source.all_users().await?;
    let mut lookup = SignalLookup::new(source);
    let me = lookup.get(user_id).await?.clone();

    let candidates: Vec<&User> = users
        .iter()
        .filter(|u| u.id != user_id && !me.is_friend(u.id))
        .collect();

    let recommendations = match strategy {
        RecommendationStrategy::InterestBased => {
            interest_based(&mut lookup, &me, &candidates, limit).await?
        }
        RecommendationStrategy::MutualFriends => {
            mutual_friends_based(&mut lookup, &me, &candidates, limit).await?
        }
        RecommendationStrategy::RecentInteractions => {
            recent_interactions_based(source, user_id, &users, limit).await?
        }
        RecommendationStrategy::Combined => {
            let mut all = interest_based(&mut lookup, &me, &candidates, usize::MAX).await?;
            all.extend(mutual_friends_based(&mut lookup, &me, &candidates, usize::MAX).await?);
            all.extend(recent_interactions_based(source, user_id, &users, usize::MAX).await?);
            let mut combined = dedup_by_key(all, |r| r.user.id);
            combined.truncate(limit);
            combined
        }
    };

    info!(
        user_id,
        strategy = ?strategy,
        candidates = candidates.len(),
        users_loaded = lookup.len(),
        returned = recommendations.len(),
        "Recommended users"
    );
    Ok(recommendations)
}

/// Non-friends with shared topics or shared third-party engagement.
async fn interest_based(
    lookup: &mut SignalLookup<'_>,
    me: &UserSignals,
    candidates: &[&User],
    limit: usize,
) -> Result<Vec<UserRecommendation>> {
    let mut recommendations = Vec::new();
    for candidate in candidates {
        let theirs = lookup.get(candidate.id).await?;
        let aff = affinity(me, theirs);
        if !aff.has_shared_interest() {
            continue;
        }

        let mut parts = Vec::new();
        if !aff.common_topics.is_empty() {
            parts.push(format!("shared interests: {} topics", aff.common_topics.len()));
        }
        if aff.common_interaction_count > 0 {
            parts.push(format!(
                "shared engagement: {} posts",
                aff.common_interaction_count
            ));
        }

        debug!(
            user_id = me.user_id,
            candidate_id = candidate.id,
            topics = aff.common_topics.len(),
            interactions = aff.common_interaction_count,
            "Interest-based candidate"
        );

        recommendations.push(UserRecommendation {
            user: (*candidate).clone(),
            score: (aff.common_topics.len() + aff.common_interaction_count) as f64,
            reason: parts.join(", "),
            recommendation_type: RecommendationType::InterestBased,
            common_topics: aff.common_topics,
            mutual_friend_count: aff.mutual_friend_count,
            common_interaction_count: aff.common_interaction_count,
            interaction_count: 0,
        });
    }

    sort_by_score_desc(&mut recommendations, |r| r.score);
    recommendations.truncate(limit);
    Ok(recommendations)
}

/// Non-friends who share at least one accepted friend.
async fn mutual_friends_based(
    lookup: &mut SignalLookup<'_>,
    me: &UserSignals,
    candidates: &[&User],
    limit: usize,
) -> Result<Vec<UserRecommendation>> {
    let mut recommendations = Vec::new();
    for candidate in candidates {
        let theirs = lookup.get(candidate.id).await?;
        let mutual = me.friends.intersection(&theirs.friends).count();
        if mutual == 0 {
            continue;
        }

        recommendations.push(UserRecommendation {
            user: (*candidate).clone(),
            score: mutual as f64,
            reason: format!("{mutual} mutual friends"),
            recommendation_type: RecommendationType::MutualFriendsBased,
            common_topics: Default::default(),
            mutual_friend_count: mutual,
            common_interaction_count: 0,
            interaction_count: 0,
        });
    }

    sort_by_score_desc(&mut recommendations, |r| r.score);
    recommendations.truncate(limit);
    Ok(recommendations)
}

/// Users who liked or commented on the requester's posts.
///
/// Friends are not excluded here, so `Combined` can list an existing
/// friend when their only signal is engagement on the requester's posts.
async fn recent_interactions_based(
    source: &dyn SignalSource,
    user_id: UserId,
    users: &[User],
    limit: usize,
) -> Result<Vec<UserRecommendation>> {
    let my_posts = source.posts_authored_by(user_id).await?;

    let mut counts: HashMap<UserId, usize> = HashMap::new();
    for post in &my_posts {
        for engager in source.post_engagements(post.id).await? {
            if engager != user_id {
                *counts.entry(engager).or_default() += 1;
            }
        }
    }

    let known: HashSet<UserId> = users.iter().map(|u| u.id).collect();
    debug!(
        user_id,
        posts = my_posts.len(),
        engagers = counts.len(),
        unknown = counts.keys().filter(|id| !known.contains(id)).count(),
        "Counted interactions on user's posts"
    );

    let mut recommendations: Vec<UserRecommendation> = users
        .iter()
        .filter_map(|u| {
            let count = *counts.get(&u.id)?;
            Some(UserRecommendation {
                user: u.clone(),
                score: count as f64,
                reason: format!("{count} interactions with your posts"),
                recommendation_type: RecommendationType::RecentInteractionsBased,
                common_topics: Default::default(),
                mutual_friend_count: 0,
                common_interaction_count: 0,
                interaction_count: count,
            })
        })
        .collect();

    sort_by_score_desc(&mut recommendations, |r| r.score);
    recommendations.truncate(limit);
    Ok(recommendations)
}
