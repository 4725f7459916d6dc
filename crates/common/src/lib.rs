// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between `authgate` clients and the server.
//! This module defines the JSON request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme reported alongside issued tokens
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Body of `POST /register`
#[derive(Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    /// Unique account name
    pub username: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /refresh`
#[derive(Serialize, Deserialize, Clone)]
pub struct RefreshRequest {
    /// Refresh token from a previous login or refresh
    pub refresh_token: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

/// Plain acknowledgment, e.g. `{"message":"registered"}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Token pair returned by `POST /login` and `POST /refresh`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    /// Short-lived token for the `Authorization: Bearer` header
    pub access_token: String,
    /// Long-lived token exchanged at `POST /refresh`
    pub refresh_token: String,
    /// Access token expiry (unix seconds)
    pub access_expires_at: i64,
    /// Refresh token expiry (unix seconds)
    pub refresh_expires_at: i64,
    /// Always [`BEARER_TOKEN_TYPE`]
    pub token_type: String,
}

/// Body of `GET /api/profile`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    /// Subject resolved from the bearer token
    pub user: String,
}

/// Body of `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body shared by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
