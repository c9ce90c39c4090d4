// RecommendationEngine — the entry point the transport layer calls.
//
// Stateless apart from the signal source handle: every call rebuilds
// interests and scores from scratch and keeps nothing afterwards. The
// acting user is always an explicit parameter.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;

use crate::db::models::UserId;
use crate::db::SignalSource;
use crate::ranking::results::{GroupRecommendation, ScoredPost, UserRecommendation};
use crate::ranking::users::RecommendationStrategy;
use crate::ranking::{groups, posts, users};
use crate::scoring::affinity::{self, Affinity};
use crate::scoring::post::PersonalizationWeights;
use crate::topics::interests::{self, InterestProfile};

pub struct RecommendationEngine {
    source: Arc<dyn SignalSource>,
    weights: PersonalizationWeights,
}

impl RecommendationEngine {
    pub fn new(source: Arc<dyn SignalSource>) -> Self {
        Self {
            source,
            weights: PersonalizationWeights::default(),
        }
    }

    /// Personalized "for you" feed. Always starts at rank 0.
    pub async fn get_personalized_feed(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredPost>> {
        posts::personalized_feed(self.source.as_ref(), user_id, limit, &self.weights).await
    }

    /// Trending posts by engagement, one page at a time.
    pub async fn get_trending_feed(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ScoredPost>> {
        posts::trending_feed(self.source.as_ref(), user_id, limit, offset).await
    }

    pub async fn recommend_users(
        &self,
        user_id: UserId,
        limit: usize,
        strategy: RecommendationStrategy,
    ) -> Result<Vec<UserRecommendation>> {
        users::recommend_users(self.source.as_ref(), user_id, limit, strategy).await
    }

    pub async fn recommend_groups(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<GroupRecommendation>> {
        groups::relevant_groups(self.source.as_ref(), user_id, limit).await
    }

    /// Personal interests (authored + interacted). Never fails.
    pub async fn interests_of(&self, user_id: UserId) -> BTreeSet<String> {
        interests::interests_of(self.source.as_ref(), user_id).await
    }

    /// All three interest subsets, for "why am I seeing this" displays.
    pub async fn interest_profile(&self, user_id: UserId) -> InterestProfile {
        interests::interest_profile(self.source.as_ref(), user_id).await
    }

    pub async fn affinity(&self, user_id: UserId, candidate_id: UserId) -> Result<Affinity> {
        affinity::affinity_between(self.source.as_ref(), user_id, candidate_id).await
    }
}
