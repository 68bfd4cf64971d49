//! In-memory repository fakes for tests
//!
//! Same contracts as the PostgreSQL repositories, backed by plain maps, so
//! services and routers can be exercised without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::db::models::{Post, User};
use crate::core::db::repositories::post::{PostRepository, PostRepositoryError};
use crate::core::db::repositories::user::{UserRepository, UserRepositoryError};

/// In-memory stand-in for `PgUserRepository`
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == username) {
            return Err(UserRepositoryError::UsernameExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

/// In-memory stand-in for `PgPostRepository`
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: Mutex<HashMap<Uuid, Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn tomorrow() -> NaiveDate {
        (Utc::now() + Duration::days(1)).date_naive()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post, PostRepositoryError> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
            display_at: Self::tomorrow(),
        };
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostRepositoryError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn list_by_display_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.display_at == date)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Post, PostRepositoryError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.get_mut(&id).ok_or(PostRepositoryError::NotFound)?;
        post.content = content.to_string();
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PostRepositoryError> {
        Ok(self.posts.lock().unwrap().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_user_repository_roundtrip() {
        let repo = MemoryUserRepository::new();

        let created = repo.create("alice", "hash").await.unwrap();
        assert_eq!(
            repo.find_by_id(created.id).await.unwrap().unwrap().username,
            "alice"
        );
        assert!(
            repo.find_by_username("alice")
                .await
                .unwrap()
                .is_some()
        );

        let duplicate = repo.create("alice", "other").await;
        assert!(matches!(
            duplicate,
            Err(UserRepositoryError::UsernameExists)
        ));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_post_repository_roundtrip() {
        let repo = MemoryPostRepository::new();
        let author = Uuid::new_v4();

        let created = repo.create(author, "hello").await.unwrap();
        assert_eq!(created.author_id, author);

        let updated = repo.update_content(created.id, "world").await.unwrap();
        assert_eq!(updated.content, "world");

        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert_eq!(
            repo.list_by_display_date(created.display_at)
                .await
                .unwrap()
                .len(),
            1
        );

        assert!(repo.delete(created.id).await.unwrap());
        assert!(
            matches!(
                repo.update_content(created.id, "gone").await,
                Err(PostRepositoryError::NotFound)
            )
        );
    }
}
