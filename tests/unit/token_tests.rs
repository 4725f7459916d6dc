//! Unit tests for token issuance and validation
use authgate::auth::{SigningSecret, TokenError, TokenService, TokenType};
use authgate::config::TokenSettings;
use chrono::Utc;

use crate::test_utils::{test_settings, test_tokens};

#[test]
fn test_issued_tokens_validate_to_subject() {
    let tokens = test_tokens();
    for subject in ["bob", "alice@example.com", "Ünïcødé"] {
        let pair = tokens.issue_pair(subject).unwrap();
        assert_eq!(tokens.validate(&pair.access_token, TokenType::Access).unwrap(), subject);
        assert_eq!(
            tokens.validate(&pair.refresh_token, TokenType::Refresh).unwrap(),
            subject
        );
    }
}

#[test]
fn test_expiry_strictly_after_issuance() {
    let tokens = test_tokens();
    let now = Utc::now().timestamp();
    let pair = tokens.issue_pair_at("bob", now).unwrap();

    assert!(pair.access_expires_at > now);
    assert!(pair.refresh_expires_at > pair.access_expires_at);

    let claims = tokens.decode(&pair.access_token).unwrap();
    assert_eq!(claims.iat, now);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_validation_after_expiry() {
    let tokens = test_tokens();
    let now = Utc::now().timestamp();
    let pair = tokens.issue_pair_at("bob", now).unwrap();

    assert!(matches!(
        tokens.validate_at(&pair.access_token, TokenType::Access, pair.access_expires_at),
        Err(TokenError::Expired)
    ));
    // The refresh token outlives the access token
    assert!(tokens
        .validate_at(&pair.refresh_token, TokenType::Refresh, pair.access_expires_at)
        .is_ok());
    assert!(matches!(
        tokens.validate_at(&pair.refresh_token, TokenType::Refresh, pair.refresh_expires_at),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_different_secret_rejects() {
    let ours = test_tokens();
    let theirs = TokenService::new(
        &SigningSecret::new("a-completely-different-secret-0123456789"),
        &test_settings().tokens,
    )
    .unwrap();

    let pair = theirs.issue_pair("bob").unwrap();
    assert!(matches!(
        ours.validate(&pair.refresh_token, TokenType::Refresh),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_custom_ttls() {
    let settings = TokenSettings {
        secret: None,
        access_ttl_secs: 60,
        refresh_ttl_secs: 120,
        enforce_token_type: true,
    };
    let tokens = TokenService::new(&SigningSecret::generate(), &settings).unwrap();
    let pair = tokens.issue_pair_at("bob", 1_000).unwrap();

    assert_eq!(pair.access_expires_at, 1_060);
    assert_eq!(pair.refresh_expires_at, 1_120);
}
