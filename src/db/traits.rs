// Signal source trait — backend-agnostic async interface for every read the
// ranking engine makes.
//
// Implementors: SqliteSource (wraps rusqlite), MemorySource (fixtures).
// All methods are async so both a mutex-wrapped rusqlite connection and
// plain in-memory lookups fit behind a single interface. The engine only
// reads; nothing here mutates domain entities.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Group, GroupId, LikeKind, Member, Post, PostId, User, UserId};

#[async_trait]
pub trait SignalSource: Send + Sync {
    // --- Posts ---

    /// All posts authored by the user.
    async fn posts_authored_by(&self, user_id: UserId) -> Result<Vec<Post>>;

    /// Posts the user liked with the given like kind. Likes pointing at
    /// posts that no longer exist are skipped.
    async fn posts_liked_by(&self, user_id: UserId, kind: LikeKind) -> Result<Vec<Post>>;

    /// Posts the user commented on (one entry per post, deleted posts skipped).
    async fn posts_commented_by(&self, user_id: UserId) -> Result<Vec<Post>>;

    /// Every post. Full scan, no server-side filter.
    async fn all_posts(&self) -> Result<Vec<Post>>;

    /// Users who engaged with a post: one entry per post-like and per comment.
    async fn post_engagements(&self, post_id: PostId) -> Result<Vec<UserId>>;

    // --- Users ---

    async fn all_users(&self) -> Result<Vec<User>>;

    /// Accepted friends of the user, whichever side sent the request.
    async fn friends_of(&self, user_id: UserId) -> Result<Vec<User>>;

    /// Number of accepted friends the two users share.
    ///
    /// Convenience for adapters and callers outside the ranking paths; the
    /// engine intersects friend sets it has already loaded instead.
    async fn mutual_friend_count(&self, a: UserId, b: UserId) -> Result<usize> {
        let friends_a: HashSet<UserId> = self.friends_of(a).await?.iter().map(|u| u.id).collect();
        let friends_b = self.friends_of(b).await?;
        Ok(friends_b.iter().filter(|u| friends_a.contains(&u.id)).count())
    }

    // --- Groups ---

    async fn all_groups(&self) -> Result<Vec<Group>>;

    async fn group_members(&self, group_id: GroupId) -> Result<Vec<Member>>;

    /// Convenience built on `group_members`. Group ranking reads the
    /// member list once per group and does not call this.
    async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool> {
        Ok(self
            .group_members(group_id)
            .await?
            .iter()
            .any(|m| m.user_id == user_id))
    }

    /// Convenience built on `group_members`, like `is_member`.
    async fn member_count(&self, group_id: GroupId) -> Result<u64> {
        Ok(self.group_members(group_id).await?.len() as u64)
    }
}
