//! User registration and login against the users document.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so each record carries its
//! own salt and cost parameters. Verification always goes through the Argon2
//! verifier, never a string comparison.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::CredentialError;
use crate::model::{User, UsersDocument};
use crate::store::DocumentStore;

/// Default file name of the users document.
pub const USERS_DOCUMENT: &str = "users.json";

/// Repository of registered users.
#[derive(Clone)]
pub struct CredentialRepository {
    store: Arc<DocumentStore>,
    document: String,
    hasher: Argon2<'static>,
}

impl std::fmt::Debug for CredentialRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRepository")
            .field("store", &self.store.root())
            .field("document", &self.document)
            .finish()
    }
}

impl CredentialRepository {
    /// Repository over `users.json` in the given store.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_document(store, USERS_DOCUMENT)
    }

    /// Repository over a custom document name.
    pub fn with_document(store: Arc<DocumentStore>, document: impl Into<String>) -> Self {
        Self {
            store,
            document: document.into(),
            hasher: Argon2::default(),
        }
    }

    /// Override the Argon2 cost parameters used for new hashes.
    ///
    /// Existing hashes keep verifying with the parameters encoded in them.
    pub fn with_params(mut self, params: Params) -> Self {
        self.hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        self
    }

    /// Register a new user.
    ///
    /// The username is trimmed before validation and storage. Uniqueness is
    /// checked ignoring case against every existing user.
    pub fn register(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::EmptyField);
        }

        self.store
            .update(&self.document, |users: &mut UsersDocument| {
                if users.find(username).is_some() {
                    return Err(CredentialError::UsernameTaken);
                }
                let password_hash = self.hash(password)?;
                users.users.push(User {
                    username: username.to_string(),
                    password_hash,
                });
                Ok(())
            })
            .inspect_err(|e| tracing::debug!(username, error = %e, "registration rejected"))?;

        tracing::info!(username, "registered user");
        Ok(())
    }

    /// Check a username/password pair.
    ///
    /// Returns the username as it was registered, which may differ in case
    /// from the one supplied.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, CredentialError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::EmptyField);
        }

        let users: UsersDocument = self.store.load(&self.document)?;
        let Some(user) = users.find(username) else {
            tracing::debug!(username, "login for unknown user");
            return Err(CredentialError::InvalidCredentials);
        };

        if verify_password(&user.password_hash, password) {
            Ok(user.username.clone())
        } else {
            tracing::debug!(username, "login with wrong password");
            Err(CredentialError::InvalidCredentials)
        }
    }

    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }
}

/// Verify `password` against a stored PHC string.
///
/// Any failure, including a stored value that is not a valid hash, counts as
/// a mismatch.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, Arc<DocumentStore>, CredentialRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(dir.path()));
        let cheap = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
        let repo = CredentialRepository::new(Arc::clone(&store)).with_params(cheap);
        (dir, store, repo)
    }

    #[test]
    fn register_then_authenticate() {
        let (_dir, _store, repo) = repo();
        repo.register("Alice", "s3cret").unwrap();

        assert_eq!(repo.authenticate("Alice", "s3cret").unwrap(), "Alice");
        assert_eq!(repo.authenticate("aLiCe", "s3cret").unwrap(), "Alice");
    }

    #[test]
    fn stored_value_is_a_salted_hash() {
        let (_dir, store, repo) = repo();
        repo.register("alice", "s3cret").unwrap();
        repo.register("bob", "s3cret").unwrap();

        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        let alice = &users.users[0].password_hash;
        let bob = &users.users[1].password_hash;
        assert!(alice.starts_with("$argon2id$"));
        assert!(!alice.contains("s3cret"));
        assert_ne!(alice, bob, "same password must hash differently");
    }

    #[test]
    fn username_is_trimmed_before_storing() {
        let (_dir, store, repo) = repo();
        repo.register("  carol  ", "pw").unwrap();

        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        assert_eq!(users.users[0].username, "carol");
        assert_eq!(repo.authenticate(" carol ", "pw").unwrap(), "carol");
    }

    #[test]
    fn duplicate_username_ignoring_case() {
        let (_dir, store, repo) = repo();
        repo.register("Alice", "one").unwrap();

        let err = repo.register("ALICE", "two").unwrap_err();
        assert!(matches!(err, CredentialError::UsernameTaken));

        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        assert_eq!(users.users.len(), 1);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let (_dir, store, repo) = repo();
        assert!(matches!(
            repo.register("", "x"),
            Err(CredentialError::EmptyField)
        ));
        assert!(matches!(
            repo.register("   ", "x"),
            Err(CredentialError::EmptyField)
        ));
        assert!(matches!(
            repo.register("alice", ""),
            Err(CredentialError::EmptyField)
        ));
        assert!(matches!(
            repo.authenticate("", "x"),
            Err(CredentialError::EmptyField)
        ));
        assert!(matches!(
            repo.authenticate("alice", ""),
            Err(CredentialError::EmptyField)
        ));

        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        assert!(users.users.is_empty());
    }

    #[test]
    fn wrong_password_and_unknown_user_look_the_same() {
        let (_dir, _store, repo) = repo();
        repo.register("alice", "right").unwrap();

        let wrong = repo.authenticate("alice", "wrong").unwrap_err();
        let unknown = repo.authenticate("mallory", "right").unwrap_err();
        assert!(matches!(wrong, CredentialError::InvalidCredentials));
        assert!(matches!(unknown, CredentialError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn malformed_stored_hash_fails_verification() {
        let (_dir, store, repo) = repo();
        store
            .save(
                USERS_DOCUMENT,
                &UsersDocument {
                    users: vec![User {
                        username: "legacy".into(),
                        password_hash: "plaintext".into(),
                    }],
                },
            )
            .unwrap();

        let err = repo.authenticate("legacy", "plaintext").unwrap_err();
        assert!(matches!(err, CredentialError::InvalidCredentials));
    }

    #[test]
    fn registration_survives_corrupt_users_file() {
        let (_dir, store, repo) = repo();
        std::fs::write(store.path_of(USERS_DOCUMENT), "not json").unwrap();

        repo.register("dave", "pw").unwrap();
        assert_eq!(repo.authenticate("dave", "pw").unwrap(), "dave");
    }

    #[test]
    fn users_are_appended_in_order() {
        let (_dir, store, repo) = repo();
        for name in ["zoe", "adam", "mia"] {
            repo.register(name, "pw").unwrap();
        }
        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        let names: Vec<&str> = users.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["zoe", "adam", "mia"]);
    }

    #[test]
    fn verify_password_rejects_garbage() {
        assert!(!verify_password("", "pw"));
        assert!(!verify_password("$argon2id$broken", "pw"));
    }

    #[test]
    fn record_with_null_password_only_fails_itself() {
        let (_dir, store, repo) = repo();
        repo.register("alice", "pw").unwrap();

        let path = store.path_of(USERS_DOCUMENT);
        let mut raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        raw["users"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({"username": "legacy", "password": null}));
        std::fs::write(&path, raw.to_string()).unwrap();

        assert_eq!(repo.authenticate("alice", "pw").unwrap(), "alice");
        assert!(matches!(
            repo.authenticate("legacy", ""),
            Err(CredentialError::EmptyField)
        ));
        assert!(matches!(
            repo.authenticate("legacy", "anything"),
            Err(CredentialError::InvalidCredentials)
        ));
        assert!(matches!(
            repo.register("Legacy", "pw"),
            Err(CredentialError::UsernameTaken)
        ));

        let users: UsersDocument = store.load(USERS_DOCUMENT).unwrap();
        assert_eq!(users.users.len(), 2);
    }
}
