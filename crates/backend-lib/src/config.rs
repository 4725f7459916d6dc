// ============================
// authgate-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `AUTHGATE_`-prefixed environment variables (`__` separates nested keys,
//! e.g. `AUTHGATE_TOKENS__ACCESS_TTL_SECS=300`).
use std::net::SocketAddr;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::password::{HashParams, PasswordRequirements};
use crate::auth::token::{
    ACCESS_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, MIN_SECRET_LENGTH, REFRESH_TOKEN_TTL_SECS,
};

/// Config file read by [`Settings::load`]
pub const DEFAULT_CONFIG_FILE: &str = "authgate.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "AUTHGATE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Default log directive, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    /// Token issuance settings
    pub tokens: TokenSettings,
    /// Password complexity requirements
    pub password_requirements: PasswordRequirements,
    /// scrypt cost for new password hashes
    pub password_hash: HashParams,
}

/// Token issuance settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    /// HMAC secret. When unset a random one is generated at startup.
    pub secret: Option<String>,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
    /// Reject refresh tokens on protected routes and access tokens at `/refresh`
    pub enforce_token_type: bool,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("enforce_token_type", &self.enforce_token_type)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            tokens: TokenSettings::default(),
            password_requirements: PasswordRequirements::default(),
            password_hash: HashParams::default(),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: None,
            access_ttl_secs: ACCESS_TOKEN_TTL_SECS,
            refresh_ttl_secs: REFRESH_TOKEN_TTL_SECS,
            enforce_token_type: true,
        }
    }
}

impl Settings {
    /// Load from [`DEFAULT_CONFIG_FILE`] and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from `path` and the environment. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings: Settings = Self::figment(path).extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The provider stack behind [`Settings::load_from`]
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "log_level",
                format!("expected one of {LOG_LEVELS:?}, got {:?}", self.log_level),
            ));
        }

        let tokens = &self.tokens;
        if tokens.access_ttl_secs == 0 {
            return Err(ConfigError::invalid("tokens.access_ttl_secs", "must be positive"));
        }
        if tokens.refresh_ttl_secs == 0 {
            return Err(ConfigError::invalid("tokens.refresh_ttl_secs", "must be positive"));
        }
        if tokens.access_ttl_secs >= tokens.refresh_ttl_secs {
            return Err(ConfigError::invalid(
                "tokens.access_ttl_secs",
                "must be shorter than tokens.refresh_ttl_secs",
            ));
        }
        if tokens.refresh_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::invalid(
                "tokens.refresh_ttl_secs",
                format!("must not exceed {MAX_TOKEN_TTL_SECS} seconds"),
            ));
        }
        if let Some(secret) = &tokens.secret {
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(ConfigError::invalid(
                    "tokens.secret",
                    format!("must be at least {MIN_SECRET_LENGTH} bytes"),
                ));
            }
        }

        if self.password_requirements.min_length == 0 {
            return Err(ConfigError::invalid(
                "password_requirements.min_length",
                "must be at least 1",
            ));
        }

        self.password_hash
            .to_scrypt()
            .map_err(|e| ConfigError::invalid("password_hash", e.to_string()))?;

        Ok(())
    }
}
