use async_trait::async_trait;

use crate::models::*;
use crate::query::PostQuery;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("Post not found")] NotFound,
    #[error("{0}")] Storage(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            other => RepoError::Storage(other.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;
    async fn get_post(&self, id: Id) -> RepoResult<Post>;
    async fn create_post(&self, input: PostInput) -> RepoResult<Post>;
    async fn update_post(&self, id: Id, input: PostInput) -> RepoResult<Post>;
    async fn delete_post(&self, id: Id) -> RepoResult<()>;
    async fn count_posts(&self) -> RepoResult<i64>;
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// Distinct categories in ascending order.
    async fn list_categories(&self) -> RepoResult<Vec<String>>;
}

pub trait Repo: PostRepo + CategoryRepo {}

impl<T> Repo for T where T: PostRepo + CategoryRepo {}

#[cfg(feature = "inmem-store")]
pub mod inmem {
    use super::*;
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

    #[derive(Default)]
    struct State {
        posts: BTreeMap<Id, Post>,
        last_id: Id, // never decremented, ids are not reused
    }

    #[derive(Clone, Default)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
    }

    impl InMemRepo {
        pub fn new() -> Self {
            Self::default()
        }

        fn read(&self) -> RepoResult<RwLockReadGuard<'_, State>> {
            self.state.read().map_err(|_| RepoError::Storage("state lock poisoned".into()))
        }

        fn write(&self) -> RepoResult<RwLockWriteGuard<'_, State>> {
            self.state.write().map_err(|_| RepoError::Storage("state lock poisoned".into()))
        }
    }

    #[async_trait]
    impl PostRepo for InMemRepo {
        async fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
            let s = self.read()?;
            let mut v: Vec<_> = s.posts.values().filter(|p| query.matches(p)).cloned().collect();
            v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))); // newest first
            Ok(v)
        }

        async fn get_post(&self, id: Id) -> RepoResult<Post> {
            let s = self.read()?;
            s.posts.get(&id).cloned().ok_or(RepoError::NotFound)
        }

        async fn create_post(&self, input: PostInput) -> RepoResult<Post> {
            let mut s = self.write()?;
            s.last_id += 1;
            let now = Utc::now();
            let post = Post {
                id: s.last_id,
                title: input.title,
                content: input.content,
                author_id: input.author_id,
                category: input.category,
                tags: input.tags,
                created_at: now,
                updated_at: now,
            };
            s.posts.insert(post.id, post.clone());
            Ok(post)
        }

        async fn update_post(&self, id: Id, input: PostInput) -> RepoResult<Post> {
            let mut s = self.write()?;
            let post = s.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
            post.title = input.title;
            post.content = input.content;
            post.author_id = input.author_id;
            post.category = input.category;
            post.tags = input.tags;
            post.updated_at = Utc::now().max(post.updated_at);
            Ok(post.clone())
        }

        async fn delete_post(&self, id: Id) -> RepoResult<()> {
            let mut s = self.write()?;
            s.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
        }

        async fn count_posts(&self) -> RepoResult<i64> {
            Ok(self.read()?.posts.len() as i64)
        }
    }

    #[async_trait]
    impl CategoryRepo for InMemRepo {
        async fn list_categories(&self) -> RepoResult<Vec<String>> {
            let s = self.read()?;
            let set: BTreeSet<&String> = s.posts.values().map(|p| &p.category).collect();
            Ok(set.into_iter().cloned().collect())
        }
    }
}

pub mod sqlite {
    use super::*;
    use chrono::{DateTime, Utc};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use std::str::FromStr;

    const CREATE_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            authorId TEXT NOT NULL,
            category TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '',
            createdAt DATETIME NOT NULL,
            updatedAt DATETIME NOT NULL
        )
    "#;

    const SELECT_BY_ID: &str = "SELECT id, title, content, authorId, category, tags, createdAt, updatedAt FROM posts WHERE id = ?";

    #[derive(Clone)]
    pub struct SqliteRepo { pool: SqlitePool }

    impl SqliteRepo {
        pub fn new(pool: SqlitePool) -> Self { Self { pool } }

        /// Open (creating the file if needed) and make sure the table exists.
        pub async fn connect(url: &str, max_connections: u32) -> RepoResult<Self> {
            let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(opts)
                .await?;
            let repo = Self::new(pool);
            repo.init_schema().await?;
            Ok(repo)
        }

        pub async fn init_schema(&self) -> RepoResult<()> {
            sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
            Ok(())
        }

        pub async fn close(&self) {
            self.pool.close().await;
        }
    }

    #[async_trait]
    impl PostRepo for SqliteRepo {
        async fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
            let mut qb = query.to_builder();
            let posts = qb.build_query_as::<Post>().fetch_all(&self.pool).await?;
            Ok(posts)
        }

        async fn get_post(&self, id: Id) -> RepoResult<Post> {
            sqlx::query_as::<_, Post>(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(RepoError::NotFound)
        }

        async fn create_post(&self, input: PostInput) -> RepoResult<Post> {
            let now = Utc::now();
            let done = sqlx::query(
                "INSERT INTO posts (title, content, authorId, category, tags, createdAt, updatedAt) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.author_id)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
            // read back only once the insert has completed
            self.get_post(done.last_insert_rowid()).await
        }

        async fn update_post(&self, id: Id, input: PostInput) -> RepoResult<Post> {
            let mut tx = self.pool.begin().await?;
            let previous: DateTime<Utc> = sqlx::query_scalar("SELECT updatedAt FROM posts WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepoError::NotFound)?;
            // updatedAt never moves backwards, even if the clock does
            sqlx::query(
                "UPDATE posts SET title = ?, content = ?, authorId = ?, category = ?, tags = ?, updatedAt = ? WHERE id = ?",
            )
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.author_id)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(Utc::now().max(previous))
            .bind(id)
            .execute(&mut *tx)
            .await?;
            let post = sqlx::query_as::<_, Post>(SELECT_BY_ID).bind(id).fetch_one(&mut *tx).await?;
            tx.commit().await?;
            Ok(post)
        }

        async fn delete_post(&self, id: Id) -> RepoResult<()> {
            let done = sqlx::query("DELETE FROM posts WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            if done.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn count_posts(&self) -> RepoResult<i64> {
            let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
                .fetch_one(&self.pool)
                .await?;
            Ok(n)
        }
    }

    #[async_trait]
    impl CategoryRepo for SqliteRepo {
        async fn list_categories(&self) -> RepoResult<Vec<String>> {
            let cats: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM posts ORDER BY category")
                .fetch_all(&self.pool)
                .await?;
            Ok(cats)
        }
    }
}
