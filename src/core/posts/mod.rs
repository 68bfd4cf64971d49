//! Posts module for the MOTD API
//!
//! Public listing, authenticated creation, and author-only mutation of
//! message-of-the-day posts, with a short-lived response cache on the
//! listing path.

pub mod api;
pub mod cache;

pub use api::{PostApiError, PostsApiState, posts_router};
pub use cache::PostsCache;
