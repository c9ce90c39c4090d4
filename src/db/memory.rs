// MemorySource — a SignalSource over an in-memory Dataset.
//
// Used for fixtures and tests. Lookups are linear scans over the dataset,
// which mirrors the full-scan behavior of the SQL backend closely enough
// for ranking purposes.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;

use super::models::{
    Comment, Dataset, FriendshipStatus, Group, GroupId, LikeKind, Member, Post, PostId, User,
    UserId,
};
use super::traits::SignalSource;

pub struct MemorySource {
    dataset: Dataset,
    posts_by_id: HashMap<PostId, usize>,
}

impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        let posts_by_id = dataset
            .posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        Self {
            dataset,
            posts_by_id,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn post(&self, id: PostId) -> Option<&Post> {
        self.posts_by_id.get(&id).map(|&i| &self.dataset.posts[i])
    }

    /// Resolve post ids in first-seen order, skipping duplicates and ids
    /// whose post has been deleted.
    fn resolve_posts(&self, ids: impl Iterator<Item = PostId>) -> Vec<Post> {
        let mut seen = BTreeSet::new();
        ids.filter(|id| seen.insert(*id))
            .filter_map(|id| self.post(id).cloned())
            .collect()
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.dataset.users.iter().find(|u| u.id == id)
    }
}

#[async_trait]
impl SignalSource for MemorySource {
    async fn posts_authored_by(&self, user_id: UserId) -> Result<Vec<Post>> {
        Ok(self
            .dataset
            .posts
            .iter()
            .filter(|p| p.author_id == user_id)
            .cloned()
            .collect())
    }

    async fn posts_liked_by(&self, user_id: UserId, kind: LikeKind) -> Result<Vec<Post>> {
        let ids = self
            .dataset
            .likes
            .iter()
            .filter(|l| l.user_id == user_id && l.kind == kind)
            .map(|l| l.target_id);
        Ok(self.resolve_posts(ids))
    }

    async fn posts_commented_by(&self, user_id: UserId) -> Result<Vec<Post>> {
        let ids = self
            .dataset
            .comments
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.post_id);
        Ok(self.resolve_posts(ids))
    }

    async fn all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.dataset.posts.clone())
    }

    async fn post_engagements(&self, post_id: PostId) -> Result<Vec<UserId>> {
        // Same keys the SQL tables enforce: one like per (user, target),
        // one comment per id with the last write winning.
        let mut seen_likes = HashSet::new();
        let likers = self
            .dataset
            .likes
            .iter()
            .filter(|l| l.kind == LikeKind::Post && l.target_id == post_id)
            .filter(|l| seen_likes.insert(l.user_id))
            .map(|l| l.user_id);

        let comments: BTreeMap<i64, &Comment> =
            self.dataset.comments.iter().map(|c| (c.id, c)).collect();
        let commenters = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.user_id);

        Ok(likers.chain(commenters).collect())
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        Ok(self.dataset.users.clone())
    }

    async fn friends_of(&self, user_id: UserId) -> Result<Vec<User>> {
        let mut seen = BTreeSet::new();
        Ok(self
            .dataset
            .friendships
            .iter()
            .filter(|f| f.status == FriendshipStatus::Accepted)
            .filter_map(|f| {
                if f.requester_id == user_id {
                    Some(f.addressee_id)
                } else if f.addressee_id == user_id {
                    Some(f.requester_id)
                } else {
                    None
                }
            })
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.user(id).cloned())
            .collect())
    }

    async fn all_groups(&self) -> Result<Vec<Group>> {
        Ok(self.dataset.groups.clone())
    }

    async fn group_members(&self, group_id: GroupId) -> Result<Vec<Member>> {
        Ok(self
            .dataset
            .memberships
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }
}
