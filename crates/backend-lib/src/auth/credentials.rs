// ============================
// authgate-lib/src/auth/credentials.rs
// ============================
//! In-memory credential table.
use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::password::{hash_password_secure, verify_password, HashParams};

/// A stored credential. The plaintext password never reaches this type.
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}

/// Errors raised by [`CredentialStore::register`]
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Username → password hash table guarded by a read-write lock
///
/// Verification takes the read lock, registration the write lock. scrypt
/// work always happens with the lock released.
pub struct CredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
    params: HashParams,
    /// Hash checked for unknown users so both failure paths do scrypt work
    dummy_hash: String,
}

impl CredentialStore {
    /// Create an empty store hashing with `params`
    pub fn new(params: HashParams) -> Result<Self, CredentialError> {
        let dummy_plain = Zeroizing::new(Uuid::new_v4().simple().to_string());
        let dummy_hash = hash_password_secure(dummy_plain, params)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(Self {
            credentials: RwLock::new(HashMap::new()),
            params,
            dummy_hash,
        })
    }

    /// Hash `password` and store it under `username`.
    ///
    /// An existing entry for `username` is overwritten (last write wins).
    /// Returns `true` when an earlier credential was replaced.
    pub fn register(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        if username.is_empty() {
            return Err(CredentialError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        let password_hash = hash_password_secure(Zeroizing::new(password.to_owned()), self.params)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let previous = self.credentials.write().insert(
            username.to_owned(),
            Credential {
                username: username.to_owned(),
                password_hash,
            },
        );

        let replaced = previous.is_some();
        if replaced {
            // TODO: switch to reject-on-duplicate once clients can handle a 409 from /register
            warn!(username, "overwriting existing credential");
        }
        Ok(replaced)
    }

    /// Check `password` against the stored hash for `username`.
    ///
    /// Unknown users and wrong passwords both yield `false`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let stored = self
            .credentials
            .read()
            .get(username)
            .map(|c| c.password_hash.clone());

        match stored {
            Some(hash) => verify_password(&hash, password),
            None => {
                debug!(username, "verification for unknown user");
                let _ = verify_password(&self.dummy_hash, password);
                false
            },
        }
    }

    /// Whether a credential exists for `username`
    pub fn contains(&self, username: &str) -> bool {
        self.credentials.read().contains_key(username)
    }

    /// Number of stored credentials
    pub fn len(&self) -> usize {
        self.credentials.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.read().is_empty()
    }
}
