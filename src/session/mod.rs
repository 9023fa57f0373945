//! Session contract consumed by the guard.
//!
//! The identity provider owns credential verification; this module only
//! describes the resolved principal and the resolver seam. A resolver must be
//! safe to call repeatedly within a request and return the same answer each
//! time; the guard still calls it only once per guarded entry.

mod credentials;
mod fixed;
mod provider;

pub use credentials::{extract_credential, SessionCredential};
pub use fixed::FixedSessionResolver;
pub use provider::IdentityProviderResolver;

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Authenticated principal for the current request only.
///
/// Fields the provider sends beyond `user_id` and `email` are kept verbatim in
/// `metadata`; they are opaque to this crate.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Session {
    #[must_use]
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            metadata: Map::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Human label for the principal: the provider's `name` when present,
    /// otherwise the email.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// The provider's `username`, if it sent one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.metadata.get("username").and_then(Value::as_str)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity provider returned unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("invalid identity provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Resolves the session carried by an incoming request.
///
/// `Ok(None)` means the request is anonymous. Errors are reported to the
/// caller, which decides how to fail; the guard treats them as anonymous.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve_session(&self, headers: &HeaderMap) -> Result<Option<Session>, ResolveError>;
}
