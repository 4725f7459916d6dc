//! Unit tests for password hashing and the credential store
use std::sync::Arc;

use authgate::auth::{
    hash_password, validate_password_strength, verify_password, CredentialStore, HashParams,
    PasswordRequirements,
};

const FAST: HashParams = HashParams {
    log_n: 4,
    r: 8,
    p: 1,
};

#[test]
fn test_password_hashing_and_verification() {
    let password = "SecureP@ssw0rd";
    let hash = hash_password(password, FAST).unwrap();

    assert_ne!(password, hash);
    assert!(!hash.contains(password));
    assert!(verify_password(&hash, password));
    assert!(!verify_password(&hash, "SecureP@ssw0rD"));
}

#[test]
fn test_password_strength_validation() {
    let requirements = PasswordRequirements {
        min_length: 10,
        require_uppercase: true,
        require_lowercase: true,
        require_digit: true,
        require_special: true,
    };

    assert!(validate_password_strength("SecureP@ssw0rd", &requirements));
    assert!(!validate_password_strength("Short1", &requirements));

    let custom_requirements = PasswordRequirements {
        min_length: 8,
        require_uppercase: false,
        require_lowercase: true,
        require_digit: true,
        require_special: false,
    };
    assert!(validate_password_strength(
        "securepassw0rd",
        &custom_requirements
    ));
}

#[test]
fn test_register_then_verify_many() {
    let store = CredentialStore::new(FAST).unwrap();
    for (user, pw) in [("bob", "pw1"), ("alice", "pw2"), ("carol", "pw3")] {
        store.register(user, pw).unwrap();
    }

    assert_eq!(store.len(), 3);
    assert!(store.verify("alice", "pw2"));
    assert!(!store.verify("alice", "pw1"));
    assert!(!store.verify("dave", "pw1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registers_no_lost_updates() {
    const USERS: usize = 64;
    let store = Arc::new(CredentialStore::new(FAST).unwrap());

    let handles: Vec<_> = (0..USERS)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || store.register(&format!("user{i}"), "pw"))
        })
        .collect();

    for handle in handles {
        let replaced = handle.await.unwrap().unwrap();
        assert!(!replaced);
    }

    assert_eq!(store.len(), USERS);
    assert!((0..USERS).all(|i| store.contains(&format!("user{i}"))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_verify_during_register() {
    let store = Arc::new(CredentialStore::new(FAST).unwrap());
    store.register("bob", "pw1").unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::task::spawn_blocking(move || {
            store.register(&format!("writer{i}"), "pw").unwrap();
            store.verify("bob", "pw1")
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(store.len(), 17);
}
