// SqliteSource — rusqlite backend implementing the SignalSource trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Dataset, Group, GroupId, LikeKind, Member, Post, PostId, User, UserId};
use super::traits::SignalSource;

pub struct SqliteSource {
    conn: Mutex<Connection>,
}

impl SqliteSource {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    pub async fn import_dataset(&self, dataset: &Dataset) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::import_dataset(&conn, dataset)
    }

    pub async fn row_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::row_counts(&conn)
    }
}

#[async_trait]
impl SignalSource for SqliteSource {
    async fn posts_authored_by(&self, user_id: UserId) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::posts_authored_by(&conn, user_id)
    }

    async fn posts_liked_by(&self, user_id: UserId, kind: LikeKind) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::posts_liked_by(&conn, user_id, kind)
    }

    async fn posts_commented_by(&self, user_id: UserId) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::posts_commented_by(&conn, user_id)
    }

    async fn all_posts(&self) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::all_posts(&conn)
    }

    async fn post_engagements(&self, post_id: PostId) -> Result<Vec<UserId>> {
        let conn = self.conn.lock().await;
        super::queries::post_engagements(&conn, post_id)
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().await;
        super::queries::all_users(&conn)
    }

    async fn friends_of(&self, user_id: UserId) -> Result<Vec<User>> {
        let conn = self.conn.lock().await;
        super::queries::friends_of(&conn, user_id)
    }

    async fn all_groups(&self) -> Result<Vec<Group>> {
        let conn = self.conn.lock().await;
        super::queries::all_groups(&conn)
    }

    async fn group_members(&self, group_id: GroupId) -> Result<Vec<Member>> {
        let conn = self.conn.lock().await;
        super::queries::group_members(&conn, group_id)
    }
}
