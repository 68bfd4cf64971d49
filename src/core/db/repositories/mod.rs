//! Database repositories for the MOTD API
//!
//! Repositories encapsulate data access behind traits so business logic
//! depends on the contract, not the database. Each trait has exactly one
//! production implementation (PostgreSQL); tests use the in-memory fakes.

pub mod post;
pub mod user;

#[cfg(test)]
pub mod memory;

pub use post::{PgPostRepository, PostRepository, PostRepositoryError};
pub use user::{PgUserRepository, UserRepository, UserRepositoryError};
