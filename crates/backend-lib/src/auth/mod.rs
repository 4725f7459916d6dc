// ============================
// authgate-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod credentials;
pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use credentials::{Credential, CredentialError, CredentialStore};
pub use password::{
    hash_password, hash_password_secure, validate_password_strength, verify_password, HashParams,
    PasswordRequirements,
};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{Claims, SigningSecret, TokenError, TokenPair, TokenService, TokenType};
