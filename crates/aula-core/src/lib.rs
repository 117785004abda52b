//! aula-core — Credential store, content store, and quiz scoring.
//!
//! This crate defines the document model, the self-healing JSON store, and
//! the repositories and policies that the aula portal is built on.

pub mod auth;
pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
pub mod model;
pub mod portal;
pub mod scoring;
pub mod store;
pub mod validate;

pub use config::{load_config, load_config_from, PortalConfig};
pub use error::{AuthError, ContentError, CredentialError, PortalError, StoreError};
pub use portal::Portal;
pub use store::DocumentStore;
