//! MOTD - Message of the Day REST API
//!
//! A small backend where users register, authenticate with bearer tokens,
//! and publish short message-of-the-day posts. Built with Axum and SQLx;
//! logout is implemented by revoking token ids server-side until the token's
//! natural expiry.

pub mod core;
