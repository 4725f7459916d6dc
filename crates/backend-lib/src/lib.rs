// ============================
// authgate-lib/src/lib.rs
// ============================
//! Core of the `authgate` token authentication service.
//!
//! Credentials are hashed with scrypt into an in-memory table; logins
//! receive an HS256 access/refresh token pair; protected routes sit behind
//! a bearer-token middleware.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, CredentialStore, DefaultAuth, SigningSecret, TokenService};
use crate::config::Settings;

/// log_n below this is only suitable for tests
const MIN_RECOMMENDED_LOG_N: u8 = 14;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Register / login / refresh / authenticate
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Build every collaborator once from `settings`
    ///
    /// Runs [`Settings::validate`] first, so a state is never built from
    /// settings that the config loader would refuse.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;

        let secret = match &settings.tokens.secret {
            Some(secret) => SigningSecret::new(secret.as_bytes()),
            None => {
                tracing::warn!(
                    "no signing secret configured; using a random one, issued tokens will not survive a restart"
                );
                SigningSecret::generate()
            },
        };

        if settings.password_hash.log_n < MIN_RECOMMENDED_LOG_N {
            tracing::warn!(
                log_n = settings.password_hash.log_n,
                "scrypt cost is below the recommended minimum"
            );
        }

        let tokens = Arc::new(TokenService::new(&secret, &settings.tokens)?);
        let credentials = Arc::new(CredentialStore::new(settings.password_hash)?);
        let auth = Arc::new(DefaultAuth::new(
            credentials,
            tokens,
            settings.password_requirements.clone(),
        ));

        Ok(Self::with_auth(auth))
    }

    /// Wrap an existing [`AuthService`]
    pub fn with_auth(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }
}
