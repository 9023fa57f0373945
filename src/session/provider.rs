//! Session resolution against the identity provider's session endpoint.
//!
//! Flow Overview: pull the session credential from the incoming request,
//! forward it to `GET {idp}/v1/auth/session`, and map the answer. `200` carries
//! the session JSON, `204`/`401`/`404` mean anonymous, anything else is an
//! error the guard will fail closed on.

use super::{extract_credential, ResolveError, Session, SessionCredential, SessionResolver};
use async_trait::async_trait;
use axum::http::{header::COOKIE, HeaderMap, StatusCode};
use reqwest::Client;
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const SESSION_ENDPOINT: &str = "v1/auth/session";

#[derive(Debug, Clone)]
pub struct IdentityProviderResolver {
    client: Client,
    session_url: Url,
    cookie_name: String,
}

impl IdentityProviderResolver {
    /// Build a resolver for the provider rooted at `idp_url`.
    /// # Errors
    /// Returns an error if the session endpoint URL cannot be derived or the
    /// HTTP client cannot be built.
    pub fn new(idp_url: &Url, cookie_name: &str, timeout: Duration) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            session_url: session_url(idp_url)?,
            cookie_name: cookie_name.to_string(),
        })
    }

    #[must_use]
    pub fn session_url(&self) -> &Url {
        &self.session_url
    }
}

/// Join the session endpoint onto the provider base, keeping any path prefix.
fn session_url(idp_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = idp_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SESSION_ENDPOINT)
}

#[async_trait]
impl SessionResolver for IdentityProviderResolver {
    #[instrument(skip_all, fields(endpoint = %self.session_url))]
    async fn resolve_session(&self, headers: &HeaderMap) -> Result<Option<Session>, ResolveError> {
        // No credential means no round trip to the provider.
        let Some(credential) = extract_credential(headers, &self.cookie_name) else {
            debug!("no session credential on request");
            return Ok(None);
        };

        let request = self.client.get(self.session_url.clone());
        let request = match credential {
            SessionCredential::Cookie(token) => request.header(
                COOKIE,
                format!("{}={}", self.cookie_name, token.expose_secret()),
            ),
            SessionCredential::Bearer(token) => request.bearer_auth(token.expose_secret()),
        };

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                let session: Session = response.json().await?;
                debug!("session resolved");
                Ok(Some(session))
            }
            StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                debug!("identity provider reports no session");
                Ok(None)
            }
            status => Err(ResolveError::UnexpectedStatus(status)),
        }
    }
}
