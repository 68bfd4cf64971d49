//! Post repository
//!
//! Storage boundary for posts. `PostRepository` is the trait the handlers
//! depend on; `PgPostRepository` is the production PostgreSQL implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::Post;

/// Post repository error types
#[derive(Debug, thiserror::Error)]
pub enum PostRepositoryError {
    #[error("post not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage interface for posts
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post for the given author
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post, PostRepositoryError>;

    /// Find a post by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostRepositoryError>;

    /// All posts, newest first
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts scheduled for the given display date, newest first
    async fn list_by_display_date(&self, date: NaiveDate)
    -> Result<Vec<Post>, PostRepositoryError>;

    /// Replace a post's content
    async fn update_content(&self, id: Uuid, content: &str) -> Result<Post, PostRepositoryError>;

    /// Delete a post by id, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, PostRepositoryError>;
}

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post, PostRepositoryError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, created_at, display_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostRepositoryError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at, display_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at, display_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_by_display_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at, display_at
            FROM posts
            WHERE display_at = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Post, PostRepositoryError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET content = $2
            WHERE id = $1
            RETURNING id, author_id, content, created_at, display_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        post.ok_or(PostRepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PostRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
