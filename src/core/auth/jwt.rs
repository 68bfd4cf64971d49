//! JWT utilities for token generation and verification
//!
//! Tokens are signed with HS256 and valid for 24 hours from issuance. The
//! codec is stateless: it checks signature, structure, and expiry only.
//! Revocation is the auth service's concern.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in hours
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours: TOKEN_TTL_HOURS,
        }
    }

    /// Create config from environment variables.
    ///
    /// `JWT_SECRET` is required; there is no fallback secret.
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;
        if secret.trim().is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let ttl = std::env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(TOKEN_TTL_HOURS);

        Ok(Self {
            secret,
            token_ttl_hours: ttl,
        })
    }

    /// Set the token lifetime
    pub fn token_ttl(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }
}

/// JWT errors
///
/// Every cryptographic or parsing failure collapses into `InvalidToken`
/// (expiry into `Expired`) so no internal detail crosses the boundary.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT_SECRET environment variable not set")]
    MissingSecret,

    #[error("token encoding failed")]
    Encoding,

    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::InvalidToken,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token id, the unit of revocation
    pub jti: String,
}

impl Claims {
    /// Get the subject as a user id
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::InvalidToken)
    }

    /// Expiration as a UTC instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Stateless token codec
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create JWT service from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let config = JwtConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Issue a signed token for the given user, embedding the caller-supplied
    /// token id so the token can later be revoked individually.
    pub fn issue(&self, user_id: Uuid, username: &str, jti: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.config.token_ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: jti.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| JwtError::Encoding)
    }

    /// Verify signature, structure, and expiry, returning the claims.
    ///
    /// Does not check revocation.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        // Strict expiration checking
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}
