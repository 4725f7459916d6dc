// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `authgate` HTTP server.

pub mod auth;

pub use auth::{extract_bearer, require_bearer, AuthenticatedUser, BearerError};
