//! Auth API endpoints
//!
//! - POST /auth/register - Register a new user
//! - POST /auth/login - Login and get a bearer token
//! - POST /auth/logout - Revoke the presented token
//! - DELETE /auth/delete - Delete the authenticated account
//!
//! Error bodies are `{"error": "<dot.separated.code>"}`; the codes are part
//! of the client contract.

use axum::{
    Extension, Json, Router, middleware,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::auth::middleware::{CurrentUser, require_auth};
use crate::core::auth::service::{AuthError, AuthService};
use crate::core::db::models::UserResponse;

/// Auth API state containing the auth service
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
}

/// API error body, `{"error": "<code>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>) -> Self {
        Self { error: code.into() }
    }
}

/// Convert AuthError to an API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "missing.username.or.password")
            }
            AuthError::UsernameExists => (StatusCode::CONFLICT, "username.exists"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid.credentials"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "missing.token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid.token"),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AuthError::Internal(detail) => {
                tracing::error!("internal error in auth api: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal.error")
            }
        };

        (status, Json(ErrorBody::new(code))).into_response()
    }
}

/// Username/password pair for register and login
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response for a successful logout
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Create the auth API router
pub fn auth_router(state: AuthApiState) -> Router {
    let guarded = Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/auth/delete", delete(delete_account_handler))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            require_auth,
        ));

    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .merge(guarded)
        .with_state(Arc::new(state))
}

/// Pull non-blank credentials out of the request body; a missing body,
/// malformed JSON, or blank field all collapse to the same 400.
fn credentials(
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Credentials, AuthError> {
    let Json(credentials) = payload.map_err(|_| AuthError::MissingCredentials)?;
    if credentials.username.trim().is_empty() || credentials.password.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(credentials)
}

/// POST /auth/register
async fn register_handler(
    State(state): State<Arc<AuthApiState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    let credentials = credentials(payload)?;

    let user = state
        .auth_service
        .register(&credentials.username, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let credentials = credentials(payload)?;

    let token = state
        .auth_service
        .login(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/logout
///
/// The guard attached the resolved identity; its absence means the request
/// never carried a usable token.
async fn logout_handler(
    State(state): State<Arc<AuthApiState>>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Json<LogoutResponse>, AuthError> {
    let Extension(user) = user.ok_or(AuthError::MissingToken)?;

    state.auth_service.logout(&user.jti, user.expires_at);

    Ok(Json(LogoutResponse {
        message: "logged.out".to_string(),
    }))
}

/// DELETE /auth/delete
async fn delete_account_handler(
    State(state): State<Arc<AuthApiState>>,
    user: Option<Extension<CurrentUser>>,
) -> Result<StatusCode, AuthError> {
    let Extension(user) = user.ok_or(AuthError::Unauthorized)?;

    state.auth_service.delete_account(user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
