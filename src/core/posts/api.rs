//! Posts API endpoints
//!
//! - GET /posts?date=YYYY-MM-DD - List posts, optionally by display date (public)
//! - POST /posts - Create a post (authenticated)
//! - PUT /posts/{id} - Update a post (author only)
//! - DELETE /posts/{id} - Delete a post (author only)
//!
//! The auth guard runs in front of every route here; it lets GET through and
//! attaches the resolved identity for the mutating verbs. Ownership is
//! enforced in the update/delete handlers before any mutation is delegated.

use axum::{
    Extension, Json, Router, middleware,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::api::ErrorBody;
use crate::core::auth::middleware::{CurrentUser, require_auth};
use crate::core::auth::service::AuthService;
use crate::core::db::models::PostResponse;
use crate::core::db::repositories::{
    PostRepository, PostRepositoryError, UserRepository, UserRepositoryError,
};
use crate::core::posts::cache::PostsCache;

/// Posts API state: repositories plus the list cache
#[derive(Clone)]
pub struct PostsApiState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub cache: PostsCache,
}

/// Posts API error types
#[derive(Debug, thiserror::Error)]
pub enum PostApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("post content is empty")]
    EmptyContent,

    #[error("post not found")]
    NotFound,

    #[error("not the author of this post")]
    Forbidden,

    #[error("invalid date filter")]
    InvalidDate,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PostRepositoryError> for PostApiError {
    fn from(err: PostRepositoryError) -> Self {
        match err {
            PostRepositoryError::NotFound => PostApiError::NotFound,
            PostRepositoryError::Database(e) => PostApiError::Internal(e.to_string()),
        }
    }
}

impl From<UserRepositoryError> for PostApiError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => PostApiError::NotFound,
            _ => PostApiError::Internal(err.to_string()),
        }
    }
}

/// Convert PostApiError to an API response
impl IntoResponse for PostApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            PostApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            PostApiError::EmptyContent => (StatusCode::BAD_REQUEST, "empty.content"),
            PostApiError::NotFound => (StatusCode::NOT_FOUND, "not.found"),
            PostApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            PostApiError::InvalidDate => (StatusCode::BAD_REQUEST, "invalid.date.format"),
            PostApiError::Internal(detail) => {
                tracing::error!("internal error in posts api: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal.error")
            }
        };

        (status, Json(ErrorBody::new(code))).into_response()
    }
}

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub date: Option<String>,
}

/// Request body for creating or updating a post
#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub content: Option<String>,
}

/// Create the posts API router. The guard needs the auth service; the
/// handlers need the repositories and the cache.
pub fn posts_router(state: PostsApiState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/posts", get(list_handler).post(create_handler))
        .route(
            "/posts/{id}",
            axum::routing::put(update_handler).delete(delete_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_service, require_auth))
        .with_state(Arc::new(state))
}

/// Pull non-blank content out of the request body; missing body, malformed
/// JSON, and blank content all collapse to the same 400.
fn content(payload: Result<Json<PostBody>, JsonRejection>) -> Result<String, PostApiError> {
    let content = payload
        .ok()
        .and_then(|Json(body)| body.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return Err(PostApiError::EmptyContent);
    }
    Ok(content)
}

/// GET /posts
async fn list_handler(
    State(state): State<Arc<PostsApiState>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, PostApiError> {
    let date = match query.date.as_deref() {
        Some(raw) => Some(
            raw.parse::<NaiveDate>()
                .map_err(|_| PostApiError::InvalidDate)?,
        ),
        None => None,
    };

    if let Some(cached) = state.cache.get(&date) {
        return Ok(Json(cached));
    }

    let posts = match date {
        Some(day) => state.posts.list_by_display_date(day).await?,
        None => state.posts.list_all().await?,
    };

    let out: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    state.cache.insert(date, out.clone());

    Ok(Json(out))
}

/// POST /posts
async fn create_handler(
    State(state): State<Arc<PostsApiState>>,
    user: Option<Extension<CurrentUser>>,
    payload: Result<Json<PostBody>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), PostApiError> {
    let Extension(user) = user.ok_or(PostApiError::Unauthorized)?;
    let content = content(payload)?;

    // The author may have deleted their account since the token was issued.
    if state.users.find_by_id(user.user_id).await?.is_none() {
        return Err(PostApiError::NotFound);
    }

    let post = state.posts.create(user.user_id, &content).await?;
    state.cache.invalidate_all();

    tracing::info!("post created id={} author={}", post.id, post.author_id);
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /posts/{id}
async fn update_handler(
    State(state): State<Arc<PostsApiState>>,
    user: Option<Extension<CurrentUser>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PostBody>, JsonRejection>,
) -> Result<Json<PostResponse>, PostApiError> {
    let Extension(user) = user.ok_or(PostApiError::Unauthorized)?;
    let Path(id) = path.map_err(|_| PostApiError::NotFound)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(PostApiError::NotFound)?;
    if post.author_id != user.user_id {
        return Err(PostApiError::Forbidden);
    }

    let content = content(payload)?;
    let updated = state.posts.update_content(id, &content).await?;
    state.cache.invalidate_all();

    tracing::info!("post updated id={} author={}", updated.id, updated.author_id);
    Ok(Json(updated.into()))
}

/// DELETE /posts/{id}
async fn delete_handler(
    State(state): State<Arc<PostsApiState>>,
    user: Option<Extension<CurrentUser>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, PostApiError> {
    let Extension(user) = user.ok_or(PostApiError::Unauthorized)?;
    let Path(id) = path.map_err(|_| PostApiError::NotFound)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(PostApiError::NotFound)?;
    if post.author_id != user.user_id {
        return Err(PostApiError::Forbidden);
    }

    state.posts.delete(id).await?;
    state.cache.invalidate_all();

    tracing::info!("post deleted id={} author={}", id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_api_error_status_codes() {
        assert_eq!(
            PostApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PostApiError::EmptyContent.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PostApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PostApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PostApiError::InvalidDate.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PostApiError::Internal("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_post_api_error_body_codes_are_stable() {
        for (error, code) in [
            (PostApiError::Unauthorized, "unauthorized"),
            (PostApiError::EmptyContent, "empty.content"),
            (PostApiError::NotFound, "not.found"),
            (PostApiError::Forbidden, "forbidden"),
            (PostApiError::InvalidDate, "invalid.date.format"),
            (PostApiError::Internal("detail".to_string()), "internal.error"),
        ] {
            let response = error.into_response();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json, serde_json::json!({ "error": code }));
        }
    }

    #[test]
    fn test_error_conversions() {
        let err: PostApiError = PostRepositoryError::NotFound.into();
        assert!(matches!(err, PostApiError::NotFound));

        let err: PostApiError = UserRepositoryError::NotFound.into();
        assert!(matches!(err, PostApiError::NotFound));

        let err: PostApiError = UserRepositoryError::UsernameExists.into();
        assert!(matches!(err, PostApiError::Internal(_)));
    }

    #[test]
    fn test_post_body_deserialization() {
        let body: PostBody = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert_eq!(body.content.as_deref(), Some("hello"));

        let body: PostBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.content.is_none());
    }

    #[test]
    fn test_list_posts_query_deserialization() {
        let query: ListPostsQuery = serde_json::from_str(r#"{"date": "2025-06-01"}"#).unwrap();
        assert_eq!(query.date.as_deref(), Some("2025-06-01"));
    }
}
