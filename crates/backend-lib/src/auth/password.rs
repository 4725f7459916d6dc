// ============================
// authgate-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Upper bound on accepted password length, in bytes
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Password complexity requirements
///
/// The defaults only demand a non-empty password. Stricter rules are
/// enabled through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 1,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_special: false,
        }
    }
}

/// scrypt cost parameters used for new hashes
///
/// Existing hashes carry their own parameters in the PHC string, so
/// changing these never invalidates stored credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashParams {
    /// log2 of the CPU/memory cost
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            log_n: 15,
            r: 8,
            p: 1,
        }
    }
}

impl HashParams {
    /// Convert into scrypt's parameter type, rejecting impossible combinations
    pub fn to_scrypt(self) -> anyhow::Result<Params> {
        Params::new(self.log_n, self.r, self.p, Params::RECOMMENDED_LEN)
            .map_err(|e| anyhow::anyhow!("invalid scrypt parameters: {e}"))
    }
}

/// Hash a password using scrypt with a fresh random salt
pub fn hash_password(plain: &str, params: HashParams) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params.to_scrypt()?, &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();
    Ok(hash)
}

/// Hash a password held in a buffer that is wiped once hashing finishes
pub fn hash_password_secure(
    plain: Zeroizing<String>,
    params: HashParams,
) -> anyhow::Result<String> {
    hash_password(&plain, params)
}

/// Verify a password against a hash
///
/// An unparseable hash never verifies.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Check if a password meets the complexity requirements
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return false;
    }

    if password.chars().count() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return false;
    }

    true
}
