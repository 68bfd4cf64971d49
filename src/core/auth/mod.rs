//! Authentication module for the MOTD API
//!
//! This module provides the session-validity core:
//! - JWT issuance and verification (stateless codec)
//! - Server-side token revocation (logout for stateless tokens)
//! - The auth service tying credential checks, issuance, and revocation
//!   together into a single validation predicate
//! - The request guard enforcing authentication on mutating verbs
//! - REST endpoints for register/login/logout/delete

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod revocation;
pub mod service;

pub use api::{AuthApiState, ErrorBody, auth_router};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUser, bearer_token, require_auth};
pub use revocation::{RevocationStore, TokenStore};
pub use service::{AuthError, AuthService};
