// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use authgate_common::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::credentials::CredentialError;
use crate::auth::token::TokenError;
use crate::validation::ValidationError;

/// Application error types, one per failure class at the HTTP boundary
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Bad credentials or missing bearer credentials
    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// Signing failed while logging in
    #[error("token error: {0}")]
    TokenIssue(TokenError),

    /// Signing failed while refreshing
    #[error("token generation failed: {0}")]
    TokenGeneration(TokenError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidToken | AppError::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            },
            AppError::TokenIssue(_) | AppError::TokenGeneration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Unauthorized => "AUTH_001",
            AppError::InvalidToken => "AUTH_002",
            AppError::InvalidRefreshToken => "AUTH_003",
            AppError::TokenIssue(_) => "TOKEN_001",
            AppError::TokenGeneration(_) => "TOKEN_002",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message placed in the `error` field of the response body.
    /// Server-side failures never expose their cause.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidInput(_)
            | AppError::Unauthorized
            | AppError::InvalidToken
            | AppError::InvalidRefreshToken => self.to_string(),
            AppError::TokenIssue(_) => "token error".to_string(),
            AppError::TokenGeneration(_) => "token generation failed".to_string(),
            AppError::Internal(_) => "internal error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "request failed");
        } else {
            tracing::debug!(code = error_code, error = %self, "request rejected");
        }

        (status, Json(ErrorResponse::new(self.sanitized_message()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmptyUsername | CredentialError::EmptyPassword => {
                AppError::InvalidInput(err.to_string())
            },
            CredentialError::Hashing(msg) => AppError::Internal(msg),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("background task failed: {err}"))
    }
}
