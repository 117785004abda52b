//! Error types for the portal core.
//!
//! Every variant is a recoverable, user-facing condition. Loading heals a
//! corrupt document in place, so [`StoreError::Malformed`] only reaches
//! callers of the read-only inspection path. Real I/O failures (permissions,
//! full disk) always escape as [`StoreError`].

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing a backing document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file or its directory could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a readable document.
    #[error("malformed document {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory document could not be encoded as JSON.
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by the credential repository.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Username (after trimming) or password was empty.
    #[error("username and password are required")]
    EmptyField,

    /// A user with the same name, ignoring case, already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Unknown user or wrong password. The two are deliberately identical.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The password hasher rejected its input.
    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Errors returned by content lookups that must distinguish "no such page".
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("topic not found: {course}/{topic}")]
    TopicNotFound { course: String, topic: String },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ContentError {
    /// Returns `true` if the caller should render a "not found" page.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::CourseNotFound(_) | ContentError::TopicNotFound { .. }
        )
    }
}

/// Errors from the auth gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No principal is attached to the current session.
    #[error("not signed in")]
    Unauthenticated,
}

/// Errors surfaced by the [`Portal`](crate::portal::Portal) facade.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl PortalError {
    /// Returns `true` if the caller should send the user back to the entry point.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, PortalError::Auth(AuthError::Unauthenticated))
    }
}
