//! Authentication service
//!
//! Orchestrates registration, login, logout, and token validation on top of
//! the user repository, the token codec, and the revocation store. This is
//! the only path by which a bearer token becomes a trusted identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::auth::jwt::{Claims, JwtError, JwtService};
use crate::core::auth::revocation::TokenStore;
use crate::core::db::models::User;
use crate::core::db::repositories::{UserRepository, UserRepositoryError};

/// Cost factor for bcrypt hashing
const BCRYPT_COST: u32 = 12;

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing username or password")]
    MissingCredentials,

    #[error("username already taken")]
    UsernameExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or revoked token")]
    InvalidToken,

    #[error("authentication required")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::UsernameExists => AuthError::UsernameExists,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired | JwtError::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenStore>,
    jwt: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenStore>,
        jwt: JwtService,
    ) -> Self {
        Self { users, tokens, jwt }
    }

    /// Hash a password with bcrypt (salt generated per call)
    fn hash_password(password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a password against a bcrypt hash. A malformed hash is treated
    /// as a mismatch, not an error the caller has to branch on.
    fn verify_password(password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("password verification failed: {}", e);
                false
            }
        }
    }

    /// Register a new user
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        tracing::info!("register user: {}", username);

        let password_hash = Self::hash_password(password)?;
        let user = self.users.create(username, &password_hash).await?;

        tracing::info!("user registered: {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Authenticate a user and issue a fresh token.
    ///
    /// An unknown username and a wrong password produce the same failure so
    /// callers cannot enumerate accounts.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        tracing::info!("login attempt for {}", username);

        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!("login failed - user not found: {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !Self::verify_password(password, &user.password_hash) {
            tracing::warn!("login failed - invalid password for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let jti = Uuid::new_v4().to_string();
        let token = self.jwt.issue(user.id, &user.username, &jti)?;

        tracing::info!("login success for {} (jti={})", username, jti);
        Ok(token)
    }

    /// Revoke a token id until the given instant. Idempotent.
    pub fn logout(&self, jti: &str, until: DateTime<Utc>) {
        tracing::info!("logout jti={} until={}", jti, until);
        self.tokens.revoke(jti, until);
    }

    /// Whether a token id has been revoked
    pub fn is_revoked(&self, jti: &str) -> bool {
        self.tokens.is_revoked(jti)
    }

    /// The composite authorization predicate: verify signature and expiry,
    /// then reject revoked token ids. Returns the claims (carrying the
    /// subject user id) only for tokens that pass both checks.
    pub fn validate(&self, token: &str) -> Option<Claims> {
        let claims = match self.jwt.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("token rejected: {}", e);
                return None;
            }
        };

        if self.is_revoked(&claims.jti) {
            tracing::warn!("token is revoked: {}", claims.jti);
            return None;
        }

        Some(claims)
    }

    /// Delete a user account (their posts cascade in storage)
    pub async fn delete_account(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.users.delete(user_id).await?;
        tracing::info!("user account deleted: {}", user_id);
        Ok(())
    }
}
