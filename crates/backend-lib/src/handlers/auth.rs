// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Credential and token endpoints.
use std::sync::Arc;

use authgate_common::{
    LoginRequest, MessageResponse, RefreshRequest, RegisterRequest, TokenResponse,
    BEARER_TOKEN_TYPE,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use zeroize::Zeroize;

use crate::auth::TokenPair;
use crate::{error::AppError, AppState};

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(mut request) = payload?;

    let result = state.auth.register(&request.username, &request.password).await;
    request.password.zeroize();
    result?;

    Ok(Json(MessageResponse::new("registered")))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(mut request) = payload?;

    let result = state.auth.login(&request.username, &request.password).await;
    request.password.zeroize();

    Ok(Json(result?.into()))
}

/// POST /refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(request) = payload?;

    if request.refresh_token.is_empty() {
        return Err(AppError::InvalidInput(
            "refresh_token must not be empty".to_string(),
        ));
    }

    let pair = state.auth.refresh(&request.refresh_token).await?;
    Ok(Json(pair.into()))
}
