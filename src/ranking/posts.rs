// Post ranking — score every candidate, sort, and page.
//
// The candidate set is every post the source returns (there is no
// pre-filtering index, so this is a full scan per request). Own posts and
// reshares are never candidates.
//
// Personalized: keep strictly positive scores, always start at rank 0.
// Trending: keep every candidate (zero engagement is a legitimate score),
// skip `offset`, then take `limit`.

use anyhow::Result;
use tracing::info;

use super::results::{sort_by_score_desc, ScoredPost};
use crate::db::models::{Post, UserId};
use crate::db::SignalSource;
use crate::scoring::post::{self, PersonalizationWeights};
use crate::topics::interests::{self, InterestProfile};

/// Which scoring formula a ranking pass uses.
#[derive(Debug, Clone, Copy)]
pub enum RankingMode<'a> {
    Personalized(&'a InterestProfile),
    Trending,
}

/// Rank a candidate set for one user.
pub fn rank(
    candidates: Vec<Post>,
    user_id: UserId,
    mode: RankingMode<'_>,
    weights: &PersonalizationWeights,
    limit: usize,
    offset: usize,
) -> Vec<ScoredPost> {
    match mode {
        RankingMode::Personalized(profile) => {
            let mut scored: Vec<ScoredPost> = candidates
                .into_iter()
                .filter_map(|p| {
                    let breakdown = post::personalized_score(&p, user_id, profile, weights)?;
                    if breakdown.score <= 0.0 {
                        return None;
                    }
                    Some(ScoredPost {
                        score: breakdown.score,
                        reason: Some(format!(
                            "matches your topics: {}",
                            breakdown.matched_topics.join(", ")
                        )),
                        breakdown: Some(breakdown),
                        post: p,
                    })
                })
                .collect();

            sort_by_score_desc(&mut scored, |s| s.score);
            scored.truncate(limit);
            scored
        }
        RankingMode::Trending => {
            let mut scored: Vec<ScoredPost> = candidates
                .into_iter()
                .filter(|p| post::is_rankable(p, user_id))
                .map(|p| ScoredPost {
                    score: post::trending_score(&p),
                    reason: None,
                    breakdown: None,
                    post: p,
                })
                .collect();

            sort_by_score_desc(&mut scored, |s| s.score);
            scored.into_iter().skip(offset).take(limit).collect()
        }
    }
}

/// The "for you" feed: posts ranked by topic affinity with the user.
pub async fn personalized_feed(
    source: &dyn SignalSource,
    user_id: UserId,
    limit: usize,
    weights: &PersonalizationWeights,
) -> Result<Vec<ScoredPost>> {
    let profile = interests::interest_profile(source, user_id).await;
    if profile.is_empty() {
        info!(user_id, "No interest signals, personalized feed is empty");
        return Ok(Vec::new());
    }

    let candidates = source.all_posts().await?;
    let candidate_count = candidates.len();
    let ranked = rank(
        candidates,
        user_id,
        RankingMode::Personalized(&profile),
        weights,
        limit,
        0,
    );

    info!(
        user_id,
        candidates = candidate_count,
        returned = ranked.len(),
        "Ranked personalized feed"
    );
    Ok(ranked)
}

/// Popular posts by raw engagement, paged with `offset` and `limit`.
pub async fn trending_feed(
    source: &dyn SignalSource,
    user_id: UserId,
    limit: usize,
    offset: usize,
) -> Result<Vec<ScoredPost>> {
    let candidates = source.all_posts().await?;
    let candidate_count = candidates.len();
    let ranked = rank(
        candidates,
        user_id,
        RankingMode::Trending,
        &PersonalizationWeights::default(),
        limit,
        offset,
    );

    info!(
        user_id,
        candidates = candidate_count,
        offset,
        returned = ranked.len(),
        "Ranked trending feed"
    );
    Ok(ranked)
}
