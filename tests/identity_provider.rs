//! Integration tests for the identity provider session resolver.
//!
//! A stub provider is served in-process on an ephemeral port. Its answer is
//! keyed on the credential the resolver forwards, so each test can also check
//! that the cookie or bearer token arrived intact.

use anyhow::Result;
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gatehouse::session::{IdentityProviderResolver, ResolveError, SessionResolver};
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use tokio::net::TcpListener;
use url::Url;

const COOKIE_NAME: &str = "gatehouse_session";

async fn stub_session(headers: HeaderMap) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match (cookie, bearer) {
        ("gatehouse_session=valid", _) | (_, "Bearer valid") => Json(json!({
            "user_id": "u-1",
            "email": "alice@example.com",
            "username": "alice",
            "roles": ["admin"],
        }))
        .into_response(),
        ("gatehouse_session=expired", _) => StatusCode::NO_CONTENT.into_response(),
        ("gatehouse_session=unknown", _) => StatusCode::UNAUTHORIZED.into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn spawn_provider() -> Result<SocketAddr> {
    let app = Router::new().route("/idp/v1/auth/session", get(stub_session));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

async fn resolver() -> Result<IdentityProviderResolver> {
    let addr = spawn_provider().await?;
    let idp = Url::parse(&format!("http://{addr}/idp"))?;
    Ok(IdentityProviderResolver::new(
        &idp,
        COOKIE_NAME,
        Duration::from_secs(2),
    )?)
}

fn with_cookie(value: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(value)?);
    Ok(headers)
}

#[tokio::test]
async fn valid_cookie_resolves_session_with_metadata() -> Result<()> {
    let resolver = resolver().await?;
    let headers = with_cookie("theme=dark; gatehouse_session=valid")?;

    let session = resolver.resolve_session(&headers).await?;
    let session = session.ok_or_else(|| anyhow::anyhow!("expected a session"))?;

    assert_eq!(session.user_id, "u-1");
    assert_eq!(session.email, "alice@example.com");
    assert_eq!(session.username(), Some("alice"));
    assert_eq!(session.metadata["roles"], json!(["admin"]));
    Ok(())
}

#[tokio::test]
async fn bearer_token_is_forwarded() -> Result<()> {
    let resolver = resolver().await?;
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer valid"));

    let session = resolver.resolve_session(&headers).await?;
    assert!(session.is_some());
    Ok(())
}

#[tokio::test]
async fn no_content_and_unauthorized_are_anonymous() -> Result<()> {
    let resolver = resolver().await?;

    for cookie in ["gatehouse_session=expired", "gatehouse_session=unknown"] {
        let session = resolver.resolve_session(&with_cookie(cookie)?).await?;
        assert!(session.is_none(), "{cookie}");
    }
    Ok(())
}

#[tokio::test]
async fn server_error_is_reported() -> Result<()> {
    let resolver = resolver().await?;

    let result = resolver
        .resolve_session(&with_cookie("gatehouse_session=garbage")?)
        .await;
    assert!(matches!(
        result,
        Err(ResolveError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR))
    ));
    Ok(())
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let resolver = IdentityProviderResolver::new(
        &Url::parse(&format!("http://{addr}"))?,
        COOKIE_NAME,
        Duration::from_secs(1),
    )?;
    let result = resolver
        .resolve_session(&with_cookie("gatehouse_session=valid")?)
        .await;
    assert!(matches!(result, Err(ResolveError::Transport(_))));
    Ok(())
}
