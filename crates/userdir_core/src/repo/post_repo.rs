//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD-without-update persistence APIs over `posts`.
//! - Own the bulk post insert used by the seeder.
//!
//! # Invariants
//! - Per-user listing order is insertion order (`rowid ASC`).
//! - Deleting an unknown id surfaces `NotFound`, never a silent no-op.
//! - `create_posts` runs inside the caller's transaction; it never
//!   commits on its own.

use crate::model::post::{Post, PostId};
use crate::model::user::UserId;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    body,
    created_at
FROM posts";

/// Repository interface for post operations.
pub trait PostRepository {
    /// Lists all posts owned by one user, oldest first.
    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>>;
    /// Loads one post by id.
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// Inserts one post and returns its id.
    fn create_post(&self, post: &Post) -> RepoResult<PostId>;
    /// Hard-deletes one post by id.
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
    /// Returns the total number of posts.
    fn count_posts(&self) -> RepoResult<u64>;
    /// Bulk-inserts posts (seed path only).
    fn create_posts(&self, posts: &[Post]) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "posts")?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY rowid ASC;"
        ))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn create_post(&self, post: &Post) -> RepoResult<PostId> {
        self.conn.execute(
            "INSERT INTO posts (id, user_id, title, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                post.id.to_string(),
                post.user_id.to_string(),
                post.title.as_str(),
                post.body.as_str(),
                post.created_at,
            ],
        )?;

        Ok(post.id)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_posts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn create_posts(&self, posts: &[Post]) -> RepoResult<()> {
        let mut insert = self.conn.prepare(
            "INSERT INTO posts (id, user_id, title, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;

        for post in posts {
            insert.execute(params![
                post.id.to_string(),
                post.user_id.to_string(),
                post.title.as_str(),
                post.body.as_str(),
                post.created_at,
            ])?;
        }

        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id_text: String = row.get("id")?;
    let user_id_text: String = row.get("user_id")?;

    Ok(Post {
        id: parse_uuid(&id_text, "posts.id")?,
        user_id: parse_uuid(&user_id_text, "posts.user_id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
    })
}
