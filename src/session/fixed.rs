use super::{ResolveError, Session, SessionResolver};
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolver that always answers with the same session (or none).
///
/// Counts how often it was asked so callers can check the guard resolves once.
#[derive(Debug, Default)]
pub struct FixedSessionResolver {
    session: Option<Session>,
    calls: AtomicUsize,
}

impl FixedSessionResolver {
    #[must_use]
    pub fn authenticated(session: Session) -> Self {
        Self {
            session: Some(session),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionResolver for FixedSessionResolver {
    async fn resolve_session(&self, _headers: &HeaderMap) -> Result<Option<Session>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.session.clone())
    }
}
