//! Auth gate and the persisted session it reads from.
//!
//! The gate only cares whether a principal is present. What the principal
//! contains is up to the session mechanism; here it is the canonical username
//! returned by a successful login.

use std::fmt;
use std::sync::Arc;

use crate::error::{AuthError, StoreError};
use crate::model::SessionDocument;
use crate::store::DocumentStore;

/// Default file name of the session document.
pub const SESSION_DOCUMENT: &str = "session.json";

/// The identity attached to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(String);

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a principal is present.
pub fn is_authenticated(principal: Option<&Principal>) -> bool {
    principal.is_some()
}

/// Gate for protected operations.
pub fn require(principal: Option<&Principal>) -> Result<&Principal, AuthError> {
    principal.ok_or(AuthError::Unauthenticated)
}

/// Session state kept in the document store.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<DocumentStore>,
    document: String,
}

impl Session {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_document(store, SESSION_DOCUMENT)
    }

    pub fn with_document(store: Arc<DocumentStore>, document: impl Into<String>) -> Self {
        Self {
            store,
            document: document.into(),
        }
    }

    /// Current principal, if someone is signed in.
    pub fn principal(&self) -> Result<Option<Principal>, StoreError> {
        let session: SessionDocument = self.store.load(&self.document)?;
        Ok(session
            .user
            .filter(|u| !u.trim().is_empty())
            .map(Principal::new))
    }

    /// Attach `username` to the session, replacing any previous principal.
    pub fn sign_in(&self, username: &str) -> Result<Principal, StoreError> {
        self.store.save(
            &self.document,
            &SessionDocument {
                user: Some(username.to_string()),
            },
        )?;
        tracing::debug!(username, "session opened");
        Ok(Principal::new(username))
    }

    /// Clear the session. Signing out twice is a no-op.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store
            .save(&self.document, &SessionDocument::default())?;
        tracing::debug!("session cleared");
        Ok(())
    }
}
