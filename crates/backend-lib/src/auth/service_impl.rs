// ============================
// authgate-lib/src/auth/service_impl.rs
// ============================
use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::credentials::CredentialStore;
use super::password::PasswordRequirements;
use super::token::{TokenError, TokenPair, TokenService, TokenType};
use super::AuthService;
use crate::error::AppError;
use crate::metrics::{
    AUTH_LOGIN_FAILURE, AUTH_LOGIN_SUCCESS, AUTH_REFRESH_FAILURE, AUTH_REFRESH_SUCCESS,
    AUTH_REGISTER,
};
use crate::validation::{validate_password, validate_username};

/// Composes the credential store and token service.
///
/// scrypt runs on tokio's blocking pool so request workers never stall on it.
pub struct DefaultAuth {
    credentials: Arc<CredentialStore>,
    tokens: Arc<TokenService>,
    requirements: PasswordRequirements,
}

impl DefaultAuth {
    pub fn new(
        credentials: Arc<CredentialStore>,
        tokens: Arc<TokenService>,
        requirements: PasswordRequirements,
    ) -> Self {
        Self {
            credentials,
            tokens,
            requirements,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        validate_username(username)?;
        validate_password(password, &self.requirements)?;

        let store = Arc::clone(&self.credentials);
        let username_owned = username.to_owned();
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || store.register(&username_owned, &password)).await??;

        counter!(AUTH_REGISTER).increment(1);
        info!(username, "user registered");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }

        let store = Arc::clone(&self.credentials);
        let username_owned = username.to_owned();
        let password = Zeroizing::new(password.to_owned());
        let verified =
            tokio::task::spawn_blocking(move || store.verify(&username_owned, &password)).await?;

        if !verified {
            counter!(AUTH_LOGIN_FAILURE).increment(1);
            debug!(username, "login rejected");
            return Err(AppError::Unauthorized);
        }

        let pair = self.tokens.issue_pair(username).map_err(AppError::TokenIssue)?;
        counter!(AUTH_LOGIN_SUCCESS).increment(1);
        info!(username, "user logged in");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let subject = match self.tokens.validate(refresh_token, TokenType::Refresh) {
            Ok(subject) => subject,
            Err(err) => {
                counter!(AUTH_REFRESH_FAILURE).increment(1);
                debug!(reason = err.kind(), "refresh token rejected");
                return Err(AppError::InvalidRefreshToken);
            },
        };

        let pair = self
            .tokens
            .issue_pair(&subject)
            .map_err(AppError::TokenGeneration)?;
        counter!(AUTH_REFRESH_SUCCESS).increment(1);
        debug!(username = %subject, "token pair rotated");
        Ok(pair)
    }

    fn authenticate(&self, access_token: &str) -> Result<String, TokenError> {
        self.tokens.validate(access_token, TokenType::Access)
    }
}
