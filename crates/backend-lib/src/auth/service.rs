// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `AuthService` trait, the register/login/refresh
//! flow exposed at the HTTP boundary.
use async_trait::async_trait;

use super::token::{TokenError, TokenPair};
use crate::error::AppError;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash and store a credential
    async fn register(&self, username: &str, password: &str) -> Result<(), AppError>;

    /// Verify a credential and issue a token pair
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError>;

    /// Exchange a valid refresh token for a new pair.
    /// The presented token stays valid until its own expiry.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError>;

    /// Resolve the subject of an access token
    fn authenticate(&self, access_token: &str) -> Result<String, TokenError>;
}
