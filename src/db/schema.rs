// Database schema — table creation.
//
// A `schema_version` table records the schema revision the file was
// created with. The tables mirror
// what the forum's persistence layer exposes to the ranking engine: users,
// posts with their topic labels and engagement counters, likes, comments,
// friendships, and groups with members.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE
        );

        -- Engagement counters are denormalized onto the post row
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY,
            author_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            like_count INTEGER NOT NULL DEFAULT 0,
            comment_count INTEGER NOT NULL DEFAULT 0,
            share_count INTEGER NOT NULL DEFAULT 0,
            original_post_id INTEGER,          -- set for reshares
            group_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS post_topics (
            post_id INTEGER NOT NULL,
            topic TEXT NOT NULL,               -- normalized (trimmed, lowercase)
            PRIMARY KEY (post_id, topic)
        );

        CREATE TABLE IF NOT EXISTS likes (
            user_id INTEGER NOT NULL,
            target_id INTEGER NOT NULL,        -- post id or comment id
            like_type TEXT NOT NULL,           -- 'POST' or 'COMMENT'
            PRIMARY KEY (user_id, target_id, like_type)
        );

        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            post_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS friendships (
            requester_id INTEGER NOT NULL,
            addressee_id INTEGER NOT NULL,
            status TEXT NOT NULL,              -- PENDING / ACCEPTED / DECLINED
            PRIMARY KEY (requester_id, addressee_id)
        );

        CREATE TABLE IF NOT EXISTS groups (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS group_topics (
            group_id INTEGER NOT NULL,
            topic TEXT NOT NULL,
            PRIMARY KEY (group_id, topic)
        );

        CREATE TABLE IF NOT EXISTS group_members (
            group_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (group_id, user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id);
        CREATE INDEX IF NOT EXISTS idx_likes_target ON likes(target_id, like_type);
        CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id);
        CREATE INDEX IF NOT EXISTS idx_comments_user ON comments(user_id);
        CREATE INDEX IF NOT EXISTS idx_members_user ON group_members(user_id);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
