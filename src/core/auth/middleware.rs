//! Request authentication guard
//!
//! Pipeline hook run before the protected routes. Read-only requests pass
//! through untouched; mutating requests must carry a valid, unrevoked bearer
//! token. On success the resolved identity is attached to the request
//! extensions for the handlers; on failure the handler is never invoked.
//!
//! "Public read / protected write" is a fixed policy here, not per-route
//! configuration.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::auth::service::{AuthError, AuthService};

/// Identity resolved from a bearer token, request-scoped
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    /// Token id, needed to revoke this token on logout
    pub jti: String,
    /// Natural expiry of the token, the horizon for its revocation
    pub expires_at: DateTime<Utc>,
}

/// Enforce authentication for state-mutating requests.
pub async fn require_auth(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method();
    if !(method == Method::POST || method == Method::PUT || method == Method::DELETE) {
        return next.run(request).await;
    }

    let token = match bearer_token(request.headers()) {
        Some(token) => token,
        None => return AuthError::MissingToken.into_response(),
    };

    let claims = match auth.validate(&token) {
        Some(claims) => claims,
        None => return AuthError::InvalidToken.into_response(),
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => return AuthError::InvalidToken.into_response(),
    };

    let expires_at = claims.expires_at();
    request.extensions_mut().insert(CurrentUser {
        user_id,
        username: claims.username,
        jti: claims.jti,
        expires_at,
    });

    next.run(request).await
}

/// Extract the bearer credential from the Authorization header.
///
/// Returns `None` when the header is absent or does not carry the exact
/// `Bearer ` prefix; whatever follows the prefix is handed to validation
/// as-is.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    auth_header.strip_prefix("Bearer ").map(str::to_string)
}
