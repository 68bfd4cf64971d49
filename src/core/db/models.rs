//! Database models for the MOTD API
//!
//! This module defines the entity structs that map to PostgreSQL tables,
//! plus the response shapes exposed over the REST API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Model
// ============================================================================

/// User entity representing a registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User without sensitive data (for API responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Post Model
// ============================================================================

/// Post entity representing a message-of-the-day entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Day on which the post is scheduled to be displayed
    pub display_at: NaiveDate,
}

/// Post as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub display_at: NaiveDate,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            content: post.content,
            created_at: post.created_at,
            display_at: post.display_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("alice"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$"));
    }

    #[test]
    fn test_user_response_from_user() {
        let user = sample_user();
        let id = user.id;

        let response: UserResponse = user.into();

        assert_eq!(response.id, id);
        assert_eq!(response.username, "alice");
    }

    #[test]
    fn test_post_response_from_post() {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "carpe diem".to_string(),
            created_at: Utc::now(),
            display_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let response: PostResponse = post.clone().into();

        assert_eq!(response.id, post.id);
        assert_eq!(response.author_id, post.author_id);
        assert_eq!(response.content, "carpe diem");
        assert_eq!(response.display_at, post.display_at);
    }

    #[test]
    fn test_post_response_serialization() {
        let response = PostResponse {
            id: Uuid::nil(),
            author_id: Uuid::nil(),
            content: "hello".to_string(),
            created_at: Utc::now(),
            display_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("hello"));
        assert!(json.contains("2025-06-01"));
    }
}
