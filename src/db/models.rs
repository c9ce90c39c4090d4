// Data models — the records that flow between signal sources and the engine.
//
// These are separate from the database queries so the scoring and ranking
// modules can use them without depending on rusqlite directly.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type PostId = i64;
pub type GroupId = i64;

/// A forum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// A candidate post as seen by the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    /// Normalized topic labels. Never mutated by scoring.
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub share_count: u64,
    /// Set when this post is a reshare of another post.
    #[serde(default)]
    pub original_post_id: Option<PostId>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl Post {
    pub fn is_reshare(&self) -> bool {
        self.original_post_id.is_some()
    }
}

/// A forum group with its topic labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub topics: BTreeSet<String>,
}

/// A user's membership in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub group_id: GroupId,
    pub user_id: UserId,
}

/// What a like points at. Only post likes count as interest signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeKind {
    Post,
    Comment,
}

impl LikeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeKind::Post => "POST",
            LikeKind::Comment => "COMMENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    /// Post id for `LikeKind::Post`, comment id for `LikeKind::Comment`.
    pub target_id: i64,
    pub kind: LikeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: UserId,
    pub post_id: PostId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Declined,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Accepted => "ACCEPTED",
            FriendshipStatus::Declined => "DECLINED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub status: FriendshipStatus,
}

/// A complete forum snapshot, as imported by `forumrank import` and used
/// to build the in-memory signal source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub friendships: Vec<Friendship>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub memberships: Vec<Member>,
}

impl Dataset {
    /// Parse a dataset from JSON, normalizing every topic label.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut dataset: Dataset = serde_json::from_str(json)?;
        dataset.normalize_topics();
        Ok(dataset)
    }

    pub fn normalize_topics(&mut self) {
        for post in &mut self.posts {
            post.topics = crate::topics::normalize_topics(post.topics.iter());
        }
        for group in &mut self.groups {
            group.topics = crate::topics::normalize_topics(group.topics.iter());
        }
    }
}
