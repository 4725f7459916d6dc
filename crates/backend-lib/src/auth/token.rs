// ============================
// authgate-lib/src/auth/token.rs
// ============================
//! Signed access and refresh tokens.
//!
//! Tokens are HS256 JWTs: three dot-separated base64url segments (header,
//! claims, signature) MACed with the process-wide signing secret. Validation
//! checks the signature first, then decodes the claims into [`Claims`], then
//! compares `exp` with the current time.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use rand::RngCore;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::TokenSettings;

/// Default access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Upper bound for either lifetime (10 years)
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Minimum accepted length of a signing secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

const GENERATED_SECRET_BYTES: usize = 32;

/// Token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("unexpected token type")]
    WrongTokenType,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("invalid token configuration: {0}")]
    Configuration(String),
}

impl TokenError {
    fn from_decode(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::Malformed(_) => "malformed",
            TokenError::WrongTokenType => "wrong_token_type",
            TokenError::Signing(_) => "signing",
            TokenError::Configuration(_) => "configuration",
        }
    }
}

/// Purpose of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried in every token
///
/// Only `username` and `exp` are required on decode; the rest default so
/// that minimal tokens still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    pub username: String,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub token_type: Option<TokenType>,
    /// Unique per token, so two pairs issued in the same second differ
    #[serde(default)]
    pub jti: Option<String>,
}

/// Access and refresh token issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

/// Process-wide HMAC key, wiped from memory on drop
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Random secret for deployments without a configured one.
    /// Tokens signed with it do not survive a restart.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; GENERATED_SECRET_BYTES]);
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([redacted])")
    }
}

/// Issues and validates tokens. Immutable after construction.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    enforce_token_type: bool,
}

impl TokenService {
    /// Build a service around `secret`
    pub fn new(secret: &SigningSecret, settings: &TokenSettings) -> Result<Self, TokenError> {
        if secret.as_bytes().len() < MIN_SECRET_LENGTH {
            return Err(TokenError::Configuration(format!(
                "signing secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }
        if settings.access_ttl_secs > MAX_TOKEN_TTL_SECS
            || settings.refresh_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            return Err(TokenError::Configuration(format!(
                "token TTLs must not exceed {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }

        let access_ttl_secs = i64::try_from(settings.access_ttl_secs)
            .map_err(|_| TokenError::Configuration("access TTL out of range".to_string()))?;
        let refresh_ttl_secs = i64::try_from(settings.refresh_ttl_secs)
            .map_err(|_| TokenError::Configuration("refresh TTL out of range".to_string()))?;

        if access_ttl_secs <= 0 {
            return Err(TokenError::Configuration("access TTL must be positive".to_string()));
        }
        if access_ttl_secs >= refresh_ttl_secs {
            return Err(TokenError::Configuration(
                "access TTL must be shorter than refresh TTL".to_string(),
            ));
        }

        // Expiry is checked by hand against an explicit clock; the library
        // only verifies the MAC and that `exp` is present and numeric.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl_secs,
            refresh_ttl_secs,
            enforce_token_type: settings.enforce_token_type,
        })
    }

    /// Issue a fresh access/refresh pair for `subject`
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        self.issue_pair_at(subject, Utc::now().timestamp())
    }

    /// Issue a pair as if the current time were `now`
    pub fn issue_pair_at(&self, subject: &str, now: i64) -> Result<TokenPair, TokenError> {
        let (access_token, access_expires_at) =
            self.sign(subject, TokenType::Access, now, self.access_ttl_secs)?;
        let (refresh_token, refresh_expires_at) =
            self.sign(subject, TokenType::Refresh, now, self.refresh_ttl_secs)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        subject: &str,
        token_type: TokenType,
        now: i64,
        ttl_secs: i64,
    ) -> Result<(String, i64), TokenError> {
        let exp = now
            .checked_add(ttl_secs)
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;
        let claims = Claims {
            username: subject.to_string(),
            exp,
            iat: now,
            token_type: Some(token_type),
            jti: Some(Uuid::new_v4().to_string()),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok((token, exp))
    }

    /// Validate `token` as a token of type `expected` and return its subject
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<String, TokenError> {
        self.validate_at(token, expected, Utc::now().timestamp())
    }

    /// Validate against an explicit clock. A token is expired once `now >= exp`.
    pub fn validate_at(
        &self,
        token: &str,
        expected: TokenType,
        now: i64,
    ) -> Result<String, TokenError> {
        let claims = self.decode(token)?;

        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        if self.enforce_token_type && claims.token_type != Some(expected) {
            return Err(TokenError::WrongTokenType);
        }

        Ok(claims.username)
    }

    /// Verify the signature and decode the claims without any time check
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::from_decode)?
            .claims;

        if claims.username.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        Ok(claims)
    }
}
