//! User repository
//!
//! Storage boundary for user accounts. `UserRepository` is the trait the
//! services depend on; `PgUserRepository` is the production PostgreSQL
//! implementation. Tests substitute the in-memory fake from `memory.rs`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::User;

/// User repository error types
#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("user not found")]
    NotFound,

    #[error("username already exists")]
    UsernameExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage interface for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. The password must already be hashed.
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, UserRepositoryError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;

    /// Delete a user by id, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, UserRepositoryError> {
        if self.find_by_username(username).await?.is_some() {
            return Err(UserRepositoryError::UsernameExists);
        }

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            // unique constraint still wins a racing insert
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(UserRepositoryError::UsernameExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
