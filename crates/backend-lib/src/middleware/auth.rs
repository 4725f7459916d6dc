// ============================
// authgate-lib/src/middleware/auth.rs
// ============================
//! Bearer-token gate for protected routes.
//!
//! Each request walks `header present → scheme is "Bearer " → token valid`;
//! the first failing step rejects it and the inner handler never runs.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use thiserror::Error;

use crate::error::AppError;
use crate::metrics::AUTH_TOKEN_REJECTED;
use crate::AppState;

/// Literal, case-sensitive scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from a valid access token, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Why the `Authorization` header could not yield a token
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BearerError {
    #[error("missing authorization header")]
    Missing,

    #[error("authorization scheme is not Bearer")]
    WrongScheme,

    #[error("empty bearer token")]
    Empty,
}

impl From<BearerError> for AppError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing | BearerError::WrongScheme => AppError::Unauthorized,
            BearerError::Empty => AppError::InvalidToken,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::WrongScheme)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::WrongScheme)?;

    if token.is_empty() {
        return Err(BearerError::Empty);
    }

    Ok(token)
}

/// Require a valid access token, then attach [`AuthenticatedUser`]
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_bearer(request.headers()) {
        Ok(token) => token.to_owned(),
        Err(err) => {
            counter!(AUTH_TOKEN_REJECTED).increment(1);
            tracing::debug!(reason = %err, "bearer header rejected");
            return Err(err.into());
        },
    };

    let username = state.auth.authenticate(&token).map_err(|err| {
        counter!(AUTH_TOKEN_REJECTED).increment(1);
        tracing::debug!(reason = err.kind(), "access token rejected");
        AppError::InvalidToken
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { username });

    Ok(next.run(request).await)
}
