//! Route guard for the session-gated subtree.
//!
//! The guard resolves the session once per guarded entry and either hands it
//! to every descendant through the request extensions or redirects to the
//! login entry point. Resolver failures are treated as "no session".

use crate::{
    gatehouse::AppState,
    session::{Session, SessionResolver},
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

/// Fixed login entry point used for every denied request.
pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Clone, Debug, PartialEq)]
pub enum GuardDecision {
    Allow(Session),
    Deny,
}

/// Ask the resolver exactly once and turn the answer into a decision.
pub async fn guard(resolver: &dyn SessionResolver, headers: &HeaderMap) -> GuardDecision {
    match resolver.resolve_session(headers).await {
        Ok(Some(session)) => {
            debug!(user_id = %session.user_id, "guard allow");
            GuardDecision::Allow(session)
        }
        Ok(None) => {
            debug!("guard deny: no session");
            GuardDecision::Deny
        }
        Err(err) => {
            // Fail closed: the provider being unreachable is not a pass.
            warn!("guard deny: session resolver failed: {err}");
            GuardDecision::Deny
        }
    }
}

/// Middleware wrapping the guarded subtree.
///
/// On deny the redirect is the whole response; the inner service never runs.
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match guard(state.resolver.as_ref(), request.headers()).await {
        GuardDecision::Allow(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardDecision::Deny => Redirect::to(LOGIN_PATH).into_response(),
    }
}

/// Session placed on the request by [`require_session`].
///
/// Handlers outside the guarded subtree never see one, so a missing session is
/// rejected with the same redirect the guard would issue.
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FixedSessionResolver, ResolveError};
    use async_trait::async_trait;
    use axum::http::StatusCode;

    struct BrokenResolver;

    #[async_trait]
    impl SessionResolver for BrokenResolver {
        async fn resolve_session(&self, _headers: &HeaderMap) -> Result<Option<Session>, ResolveError> {
            Err(ResolveError::UnexpectedStatus(StatusCode::BAD_GATEWAY))
        }
    }

    #[tokio::test]
    async fn no_session_is_denied() {
        let resolver = FixedSessionResolver::anonymous();
        assert_eq!(guard(&resolver, &HeaderMap::new()).await, GuardDecision::Deny);
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn session_is_carried_unchanged() {
        let session = Session::new("u-1", "alice@example.com").with_metadata("plan", "pro");
        let resolver = FixedSessionResolver::authenticated(session.clone());
        assert_eq!(
            guard(&resolver, &HeaderMap::new()).await,
            GuardDecision::Allow(session)
        );
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn resolver_failure_fails_closed() {
        assert_eq!(guard(&BrokenResolver, &HeaderMap::new()).await, GuardDecision::Deny);
    }

    #[tokio::test]
    async fn extractor_redirects_without_session() {
        let (mut parts, ()) = axum::http::Request::new(()).into_parts();
        let rejection = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .expect_err("missing session must be rejected");
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }
}
