// Database queries — every read the signal source makes, plus dataset import.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the crate clean Rust
// interfaces. Topic labels live in side tables and are attached to posts
// and groups after the main row query.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Params};

use super::models::{
    Dataset, Group, GroupId, LikeKind, Member, Post, PostId, User, UserId,
};
use crate::topics::normalize_topic;

const POST_COLUMNS: &str = "p.id, p.author_id, p.created_at, p.like_count, p.comment_count, \
                            p.share_count, p.original_post_id, p.group_id";

// --- Import ---

/// Load a dataset into the database, replacing rows with matching keys.
///
/// Runs in a single transaction, so a malformed dataset leaves the
/// database untouched.
pub fn import_dataset(conn: &Connection, dataset: &Dataset) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    for user in &dataset.users {
        tx.execute(
            "INSERT OR REPLACE INTO users (id, username) VALUES (?1, ?2)",
            params![user.id, user.username],
        )?;
    }

    for post in &dataset.posts {
        let like_count = counter(post.like_count, "like_count", post.id)?;
        let comment_count = counter(post.comment_count, "comment_count", post.id)?;
        let share_count = counter(post.share_count, "share_count", post.id)?;
        tx.execute(
            "INSERT OR REPLACE INTO posts
                (id, author_id, created_at, like_count, comment_count, share_count,
                 original_post_id, group_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.id,
                post.author_id,
                post.created_at.to_rfc3339(),
                like_count,
                comment_count,
                share_count,
                post.original_post_id,
                post.group_id,
            ],
        )?;
        tx.execute("DELETE FROM post_topics WHERE post_id = ?1", params![post.id])?;
        for topic in &post.topics {
            tx.execute(
                "INSERT OR IGNORE INTO post_topics (post_id, topic) VALUES (?1, ?2)",
                params![post.id, normalize_topic(topic)],
            )?;
        }
    }

    for like in &dataset.likes {
        tx.execute(
            "INSERT OR IGNORE INTO likes (user_id, target_id, like_type) VALUES (?1, ?2, ?3)",
            params![like.user_id, like.target_id, like.kind.as_str()],
        )?;
    }

    for comment in &dataset.comments {
        tx.execute(
            "INSERT OR REPLACE INTO comments (id, user_id, post_id) VALUES (?1, ?2, ?3)",
            params![comment.id, comment.user_id, comment.post_id],
        )?;
    }

    for friendship in &dataset.friendships {
        tx.execute(
            "INSERT OR REPLACE INTO friendships (requester_id, addressee_id, status)
             VALUES (?1, ?2, ?3)",
            params![
                friendship.requester_id,
                friendship.addressee_id,
                friendship.status.as_str()
            ],
        )?;
    }

    for group in &dataset.groups {
        tx.execute(
            "INSERT OR REPLACE INTO groups (id, name) VALUES (?1, ?2)",
            params![group.id, group.name],
        )?;
        tx.execute("DELETE FROM group_topics WHERE group_id = ?1", params![group.id])?;
        for topic in &group.topics {
            tx.execute(
                "INSERT OR IGNORE INTO group_topics (group_id, topic) VALUES (?1, ?2)",
                params![group.id, normalize_topic(topic)],
            )?;
        }
    }

    for member in &dataset.memberships {
        tx.execute(
            "INSERT OR IGNORE INTO group_members (group_id, user_id) VALUES (?1, ?2)",
            params![member.group_id, member.user_id],
        )?;
    }

    tx.commit().context("Failed to commit dataset import")?;
    Ok(())
}

/// Engagement counters are stored as SQLite INTEGER (i64).
fn counter(value: u64, column: &str, post_id: PostId) -> Result<i64> {
    i64::try_from(value)
        .with_context(|| format!("{column} {value} on post {post_id} does not fit in the database"))
}

// --- Posts ---

/// Raw post row before the timestamp is parsed and topics attached.
struct PostRow {
    id: PostId,
    author_id: UserId,
    created_at: String,
    like_count: i64,
    comment_count: i64,
    share_count: i64,
    original_post_id: Option<PostId>,
    group_id: Option<i64>,
}

fn query_posts<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Post>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok(PostRow {
                id: row.get(0)?,
                author_id: row.get(1)?,
                created_at: row.get(2)?,
                like_count: row.get(3)?,
                comment_count: row.get(4)?,
                share_count: row.get(5)?,
                original_post_id: row.get(6)?,
                group_id: row.get(7)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut topic_stmt =
        conn.prepare("SELECT topic FROM post_topics WHERE post_id = ?1 ORDER BY topic")?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .with_context(|| format!("Invalid created_at on post {}", row.id))?
            .with_timezone(&Utc);
        let topics = topic_stmt
            .query_map(params![row.id], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<_>>()?;
        posts.push(Post {
            id: row.id,
            author_id: row.author_id,
            created_at,
            topics,
            like_count: row.like_count.max(0) as u64,
            comment_count: row.comment_count.max(0) as u64,
            share_count: row.share_count.max(0) as u64,
            original_post_id: row.original_post_id,
            group_id: row.group_id,
        });
    }
    Ok(posts)
}

pub fn posts_authored_by(conn: &Connection, user_id: UserId) -> Result<Vec<Post>> {
    query_posts(
        conn,
        &format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.author_id = ?1 ORDER BY p.id"),
        params![user_id],
    )
}

/// Liked posts — the inner join drops likes on posts that were deleted.
pub fn posts_liked_by(conn: &Connection, user_id: UserId, kind: LikeKind) -> Result<Vec<Post>> {
    query_posts(
        conn,
        &format!(
            "SELECT {POST_COLUMNS} FROM posts p
             JOIN (SELECT DISTINCT target_id FROM likes WHERE user_id = ?1 AND like_type = ?2) l
               ON l.target_id = p.id
             ORDER BY p.id"
        ),
        params![user_id, kind.as_str()],
    )
}

pub fn posts_commented_by(conn: &Connection, user_id: UserId) -> Result<Vec<Post>> {
    query_posts(
        conn,
        &format!(
            "SELECT {POST_COLUMNS} FROM posts p
             JOIN (SELECT DISTINCT post_id FROM comments WHERE user_id = ?1) c
               ON c.post_id = p.id
             ORDER BY p.id"
        ),
        params![user_id],
    )
}

pub fn all_posts(conn: &Connection) -> Result<Vec<Post>> {
    query_posts(
        conn,
        &format!("SELECT {POST_COLUMNS} FROM posts p ORDER BY p.id"),
        [],
    )
}

/// One user id per post-like and per comment on the post.
pub fn post_engagements(conn: &Connection, post_id: PostId) -> Result<Vec<UserId>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM likes WHERE target_id = ?1 AND like_type = 'POST'
         UNION ALL
         SELECT user_id FROM comments WHERE post_id = ?1",
    )?;
    let ids = stmt
        .query_map(params![post_id], |row| row.get(0))?
        .collect::<rusqlite::Result<_>>()?;
    Ok(ids)
}

// --- Users ---

fn query_users<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(sql)?;
    let users = stmt
        .query_map(params, |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<_>>()?;
    Ok(users)
}

pub fn all_users(conn: &Connection) -> Result<Vec<User>> {
    query_users(conn, "SELECT id, username FROM users ORDER BY id", [])
}

/// Accepted friends in either direction of the request.
pub fn friends_of(conn: &Connection, user_id: UserId) -> Result<Vec<User>> {
    query_users(
        conn,
        "SELECT u.id, u.username FROM users u
         WHERE u.id IN (
             SELECT addressee_id FROM friendships WHERE requester_id = ?1 AND status = 'ACCEPTED'
             UNION
             SELECT requester_id FROM friendships WHERE addressee_id = ?1 AND status = 'ACCEPTED'
         )
         ORDER BY u.id",
        params![user_id],
    )
}

// --- Groups ---

pub fn all_groups(conn: &Connection) -> Result<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM groups ORDER BY id")?;
    let rows: Vec<(GroupId, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<_>>()?;

    let mut topic_stmt =
        conn.prepare("SELECT topic FROM group_topics WHERE group_id = ?1 ORDER BY topic")?;

    let mut groups = Vec::with_capacity(rows.len());
    for (id, name) in rows {
        let topics = topic_stmt
            .query_map(params![id], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<_>>()?;
        groups.push(Group { id, name, topics });
    }
    Ok(groups)
}

pub fn group_members(conn: &Connection, group_id: GroupId) -> Result<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT group_id, user_id FROM group_members WHERE group_id = ?1 ORDER BY user_id",
    )?;
    let members = stmt
        .query_map(params![group_id], |row| {
            Ok(Member {
                group_id: row.get(0)?,
                user_id: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<_>>()?;
    Ok(members)
}

// --- Status ---

/// Row counts for the main tables, in display order.
pub fn row_counts(conn: &Connection) -> Result<Vec<(&'static str, i64)>> {
    const TABLES: [&str; 7] = [
        "users",
        "posts",
        "likes",
        "comments",
        "friendships",
        "groups",
        "group_members",
    ];
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        counts.push((table, count));
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Comment, Friendship, FriendshipStatus, Like};
    use crate::db::schema::create_tables;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn post(id: PostId, author_id: UserId, topics: &[&str]) -> Post {
        Post {
            id,
            author_id,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            like_count: 4,
            comment_count: 1,
            share_count: 0,
            original_post_id: None,
            group_id: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            users: vec![
                User {
                    id: 1,
                    username: "ana".into(),
                },
                User {
                    id: 2,
                    username: "ben".into(),
                },
            ],
            posts: vec![post(10, 1, &["Rust", "golang"]), post(11, 2, &["cooking"])],
            likes: vec![
                Like {
                    user_id: 2,
                    target_id: 10,
                    kind: LikeKind::Post,
                },
                Like {
                    user_id: 2,
                    target_id: 404,
                    kind: LikeKind::Post,
                },
            ],
            comments: vec![Comment {
                id: 1,
                user_id: 1,
                post_id: 11,
            }],
            friendships: vec![Friendship {
                requester_id: 1,
                addressee_id: 2,
                status: FriendshipStatus::Accepted,
            }],
            groups: vec![Group {
                id: 7,
                name: "Systems".into(),
                topics: BTreeSet::from(["rust".to_string()]),
            }],
            memberships: vec![Member {
                group_id: 7,
                user_id: 2,
            }],
        }
    }

    #[test]
    fn test_import_and_read_posts() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();

        let authored = posts_authored_by(&conn, 1).unwrap();
        assert_eq!(authored.len(), 1);
        let topics: Vec<&str> = authored[0].topics.iter().map(|t| t.as_str()).collect();
        assert_eq!(topics, vec!["golang", "rust"]);
        assert_eq!(authored[0].like_count, 4);
        assert_eq!(authored[0].created_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

        assert_eq!(all_posts(&conn).unwrap().len(), 2);
    }

    #[test]
    fn test_liked_posts_skip_deleted() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        let liked = posts_liked_by(&conn, 2, LikeKind::Post).unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, 10);
        assert!(posts_liked_by(&conn, 2, LikeKind::Comment).unwrap().is_empty());
    }

    #[test]
    fn test_friends_both_directions() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        assert_eq!(friends_of(&conn, 1).unwrap()[0].id, 2);
        assert_eq!(friends_of(&conn, 2).unwrap()[0].id, 1);
    }

    #[test]
    fn test_engagements_and_comments() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        assert_eq!(post_engagements(&conn, 10).unwrap(), vec![2]);
        assert_eq!(post_engagements(&conn, 11).unwrap(), vec![1]);
        assert_eq!(posts_commented_by(&conn, 1).unwrap()[0].id, 11);
    }

    #[test]
    fn test_groups_and_members() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        let groups = all_groups(&conn).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].topics.contains("rust"));
        let members = group_members(&conn, 7).unwrap();
        assert_eq!(members, vec![Member { group_id: 7, user_id: 2 }]);
        assert!(group_members(&conn, 8).unwrap().is_empty());
    }

    #[test]
    fn test_reimport_replaces_topics() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        let mut updated = dataset();
        updated.posts[0].topics = BTreeSet::from(["zig".to_string()]);
        import_dataset(&conn, &updated).unwrap();
        let authored = posts_authored_by(&conn, 1).unwrap();
        assert_eq!(authored[0].topics, BTreeSet::from(["zig".to_string()]));
    }

    #[test]
    fn test_row_counts() {
        let conn = test_db();
        import_dataset(&conn, &dataset()).unwrap();
        let counts = row_counts(&conn).unwrap();
        assert_eq!(counts[0], ("users", 2));
        assert_eq!(counts[1], ("posts", 2));
    }

    #[test]
    fn test_oversized_counter_fails_import_without_partial_writes() {
        let conn = test_db();
        let mut data = dataset();
        data.posts[1].share_count = u64::MAX;
        let err = import_dataset(&conn, &data).unwrap_err();
        assert!(err.to_string().contains("share_count"));
        // The transaction rolled back, so nothing from the dataset landed
        assert!(all_users(&conn).unwrap().is_empty());
        assert!(all_posts(&conn).unwrap().is_empty());

        data.posts[1].share_count = i64::MAX as u64;
        import_dataset(&conn, &data).unwrap();
        let stored = posts_authored_by(&conn, 2).unwrap();
        assert_eq!(stored[0].share_count, i64::MAX as u64);
    }
}
