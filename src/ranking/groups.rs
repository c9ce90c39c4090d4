// Group recommendations — filter, classify, explain.
//
// A group the user hasn't joined is admitted if it shares a topic with the
// user's personal interests, has a friend among its members, or has more
// than 20 members. Groups carry no numeric score; results keep the order
// the source lists groups in.
//
// The reason text uses its own, lower popularity bar (more than 10
// members). The two thresholds are independent.

use std::collections::{BTreeSet, HashSet};

use anyhow::Result;
use tracing::{debug, info};

use super::results::{GroupRecommendation, RecommendationType};
use crate::db::models::{Group, UserId};
use crate::db::SignalSource;
use crate::topics::interests;

/// Member count a group must exceed to be admitted on popularity alone.
pub const POPULAR_ADMISSION_THRESHOLD: u64 = 20;

/// Member count a group must exceed for the "popular group" reason.
pub const POPULAR_REASON_THRESHOLD: u64 = 10;

pub const REASON_SHARED_INTEREST: &str = "shared interest";
pub const REASON_HAS_FRIENDS: &str = "has friends in the group";
pub const REASON_POPULAR: &str = "popular group";
pub const REASON_DEFAULT: &str = "recommended";

/// Signals measured between one user and one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSignals {
    pub common_topics: BTreeSet<String>,
    pub has_friends: bool,
    pub member_count: u64,
}

impl GroupSignals {
    pub fn is_admitted(&self) -> bool {
        !self.common_topics.is_empty()
            || self.has_friends
            || self.member_count > POPULAR_ADMISSION_THRESHOLD
    }

    pub fn recommendation_type(&self) -> RecommendationType {
        match (!self.common_topics.is_empty(), self.has_friends) {
            (true, _) => RecommendationType::InterestBased,
            (false, true) => RecommendationType::MutualFriends,
            (false, false) => RecommendationType::Popular,
        }
    }

    pub fn reason(&self) -> &'static str {
        if !self.common_topics.is_empty() {
            REASON_SHARED_INTEREST
        } else if self.has_friends {
            REASON_HAS_FRIENDS
        } else if self.member_count > POPULAR_REASON_THRESHOLD {
            REASON_POPULAR
        } else {
            REASON_DEFAULT
        }
    }
}

/// Recommend groups the user hasn't joined.
pub async fn relevant_groups(
    source: &dyn SignalSource,
    user_id: UserId,
    limit: usize,
) -> Result<Vec<GroupRecommendation>> {
    let topics = interests::interests_of(source, user_id).await;
    let friends: HashSet<UserId> = source
        .friends_of(user_id)
        .await?
        .iter()
        .map(|f| f.id)
        .collect();
    let groups: Vec<Group> = source.all_groups().await?;
    let group_count = groups.len();

    let mut recommendations = Vec::new();
    for group in groups {
        if recommendations.len() >= limit {
            break;
        }

        // One member read per group covers membership, friends, and size
        let members = source.group_members(group.id).await?;
        if members.iter().any(|m| m.user_id == user_id) {
            continue;
        }

        let signals = GroupSignals {
            common_topics: group.topics.intersection(&topics).cloned().collect(),
            has_friends: members.iter().any(|m| friends.contains(&m.user_id)),
            member_count: members.len() as u64,
        };

        if !signals.is_admitted() {
            debug!(user_id, group_id = group.id, "Group not relevant, skipping");
            continue;
        }

        recommendations.push(GroupRecommendation {
            reason: signals.reason().to_string(),
            recommendation_type: signals.recommendation_type(),
            common_topics: signals.common_topics,
            has_friends: signals.has_friends,
            member_count: signals.member_count,
            group,
        });
    }

    info!(
        user_id,
        groups = group_count,
        returned = recommendations.len(),
        "Recommended groups"
    );
    Ok(recommendations)
}
