//! The portal facade consumed by front ends.
//!
//! Wires the repositories and session to one shared [`DocumentStore`] and
//! puts the auth gate in front of every content operation.

use std::sync::Arc;

use argon2::Params;

use crate::auth::{self, Principal, Session};
use crate::config::PortalConfig;
use crate::content::{ContentRepository, QuizPage, TopicPage};
use crate::credentials::CredentialRepository;
use crate::error::PortalError;
use crate::model::{Course, Topic};
use crate::scoring::QuizOutcome;
use crate::store::DocumentStore;
use crate::validate::{validate_courses, ValidationWarning};

/// Entry point bundling credentials, content, and session state.
#[derive(Debug, Clone)]
pub struct Portal {
    store: Arc<DocumentStore>,
    credentials: CredentialRepository,
    content: ContentRepository,
    session: Session,
}

impl Portal {
    /// Portal over a store using the default document names.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::from_config_with_store(&PortalConfig::default(), store)
    }

    /// Portal rooted at `config.data_dir`.
    pub fn from_config(config: &PortalConfig) -> Self {
        let store = Arc::new(DocumentStore::new(config.data_dir.clone()));
        Self::from_config_with_store(config, store)
    }

    fn from_config_with_store(config: &PortalConfig, store: Arc<DocumentStore>) -> Self {
        Self {
            credentials: CredentialRepository::with_document(
                Arc::clone(&store),
                config.users_file.clone(),
            ),
            content: ContentRepository::with_document(
                Arc::clone(&store),
                config.courses_file.clone(),
            ),
            session: Session::with_document(Arc::clone(&store), config.session_file.clone()),
            store,
        }
    }

    /// Override the Argon2 cost parameters for new registrations.
    pub fn with_password_params(mut self, params: Params) -> Self {
        self.credentials = self.credentials.with_params(params);
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn credentials(&self) -> &CredentialRepository {
        &self.credentials
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    pub fn register(&self, username: &str, password: &str) -> Result<(), PortalError> {
        Ok(self.credentials.register(username, password)?)
    }

    /// Authenticate and attach the canonical username to the session.
    pub fn login(&self, username: &str, password: &str) -> Result<Principal, PortalError> {
        let canonical = self.credentials.authenticate(username, password)?;
        Ok(self.session.sign_in(&canonical)?)
    }

    pub fn logout(&self) -> Result<(), PortalError> {
        Ok(self.session.sign_out()?)
    }

    pub fn current_user(&self) -> Result<Option<Principal>, PortalError> {
        Ok(self.session.principal()?)
    }

    pub fn is_authenticated(&self) -> Result<bool, PortalError> {
        Ok(auth::is_authenticated(self.current_user()?.as_ref()))
    }

    fn gate(&self) -> Result<Principal, PortalError> {
        let principal = self.current_user()?;
        Ok(auth::require(principal.as_ref())?.clone())
    }

    // -----------------------------------------------------------------------
    // Content (signed-in only)
    // -----------------------------------------------------------------------

    pub fn courses(&self) -> Result<Vec<Course>, PortalError> {
        self.gate()?;
        Ok(self.content.list_courses()?)
    }

    pub fn topics(&self, course_slug: &str) -> Result<Vec<Topic>, PortalError> {
        self.gate()?;
        Ok(self.content.list_topics(course_slug)?)
    }

    pub fn topic(&self, course_slug: &str, topic_slug: &str) -> Result<TopicPage, PortalError> {
        self.gate()?;
        Ok(self.content.get_topic(course_slug, topic_slug)?)
    }

    pub fn quiz(&self, course_slug: &str, topic_slug: &str) -> Result<QuizPage, PortalError> {
        self.gate()?;
        Ok(self.content.get_quiz(course_slug, topic_slug)?)
    }

    /// Score a quiz submission. Counts are parsed permissively.
    pub fn submit_quiz(&self, correct: &str, total: &str) -> QuizOutcome {
        QuizOutcome::from_form(correct, total)
    }

    /// Check the curated content. Not gated: this is an authoring tool.
    pub fn validate_content(&self) -> Result<Vec<ValidationWarning>, PortalError> {
        let document = self.content.inspect()?.unwrap_or_default();
        Ok(validate_courses(&document))
    }
}
