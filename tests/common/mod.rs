// Shared fixtures for integration tests.
//
// The forum below is small enough to score by hand. User 1 (ana) is the
// requester in most tests:
//
//   users:    1 ana, 2 ben, 3 cat, 4 dev, 5 eve, 6 fay, 7 gus
//   friends:  1-2, 2-3, 2-5, 2-7 (accepted), 1-4 (pending)
//   posts:    100 by 1 {rust}        — liked by 2 and 6, commented twice by 6
//             200 by 4 {rust, wasm}  — 5 likes
//             300 by 5 {rust}        — 1 like, 1 comment
//             400 by 3 {cooking}     — no engagement
//             500 by 2 {golang}      — 1 share
//             600 by 6 {music}       — 3 likes, 1 comment
//             700 by 3 {rust}        — reshare of 300, 10 likes
//   groups:   10 Rustaceans {rust}, member 4
//             11 Bakers {baking}, member 2
//             12 Big Club, 25 members
//             13 Mid Club, 15 members
//             14 Joined {rust}, member 1
//             15 Rust Friends {rust}, member 2

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use forumrank::db::memory::MemorySource;
use forumrank::db::models::{
    Comment, Dataset, Friendship, FriendshipStatus, Group, Like, LikeKind, Member, Post, User,
    UserId,
};
use forumrank::RecommendationEngine;

pub fn topics(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

pub fn post(id: i64, author_id: UserId, labels: &[&str]) -> Post {
    Post {
        id,
        author_id,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(id),
        topics: topics(labels),
        like_count: 0,
        comment_count: 0,
        share_count: 0,
        original_post_id: None,
        group_id: None,
    }
}

pub fn engaged(mut p: Post, likes: u64, comments: u64, shares: u64) -> Post {
    p.like_count = likes;
    p.comment_count = comments;
    p.share_count = shares;
    p
}

pub fn user(id: UserId, name: &str) -> User {
    User {
        id,
        username: name.to_string(),
    }
}

pub fn friendship(a: UserId, b: UserId, status: FriendshipStatus) -> Friendship {
    Friendship {
        requester_id: a,
        addressee_id: b,
        status,
    }
}

pub fn post_like(user_id: UserId, post_id: i64) -> Like {
    Like {
        user_id,
        target_id: post_id,
        kind: LikeKind::Post,
    }
}

pub fn comment(id: i64, user_id: UserId, post_id: i64) -> Comment {
    Comment { id, user_id, post_id }
}

pub fn member(group_id: i64, user_id: UserId) -> Member {
    Member { group_id, user_id }
}

pub fn group(id: i64, name: &str, labels: &[&str]) -> Group {
    Group {
        id,
        name: name.to_string(),
        topics: topics(labels),
    }
}

pub fn forum() -> Dataset {
    let mut reshare = engaged(post(700, 3, &["rust"]), 10, 0, 0);
    reshare.original_post_id = Some(300);

    let mut memberships = vec![member(10, 4), member(11, 2), member(14, 1), member(15, 2)];
    memberships.extend((0..25).map(|i| member(12, 1000 + i)));
    memberships.extend((0..15).map(|i| member(13, 2000 + i)));

    Dataset {
        users: vec![
            user(1, "ana"),
            user(2, "ben"),
            user(3, "cat"),
            user(4, "dev"),
            user(5, "eve"),
            user(6, "fay"),
            user(7, "gus"),
        ],
        posts: vec![
            engaged(post(100, 1, &["rust"]), 2, 2, 0),
            engaged(post(200, 4, &["rust", "wasm"]), 5, 0, 0),
            engaged(post(300, 5, &["rust"]), 1, 1, 0),
            post(400, 3, &["cooking"]),
            engaged(post(500, 2, &["golang"]), 0, 0, 1),
            engaged(post(600, 6, &["music"]), 3, 1, 0),
            reshare,
        ],
        likes: vec![post_like(2, 100), post_like(6, 100)],
        comments: vec![comment(1, 6, 100), comment(2, 6, 100)],
        friendships: vec![
            friendship(1, 2, FriendshipStatus::Accepted),
            friendship(3, 2, FriendshipStatus::Accepted),
            friendship(2, 5, FriendshipStatus::Accepted),
            friendship(7, 2, FriendshipStatus::Accepted),
            friendship(1, 4, FriendshipStatus::Pending),
        ],
        groups: vec![
            group(10, "Rustaceans", &["rust"]),
            group(11, "Bakers", &["baking"]),
            group(12, "Big Club", &[]),
            group(13, "Mid Club", &[]),
            group(14, "Joined", &["rust"]),
            group(15, "Rust Friends", &["rust"]),
        ],
        memberships,
    }
}

pub fn engine(dataset: Dataset) -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(MemorySource::new(dataset)))
}
