//! Integration tests for the request pipeline.
//!
//! Drives the full router in-process with a fixed session resolver and checks:
//! 1. Anonymous requests to guarded paths redirect without rendering anything.
//! 2. Authenticated requests render the nested layouts in ancestor-first order.
//! 3. The resolver is consulted exactly once per guarded request.
//! 4. Public routes (health, sign-in, callback) bypass the guard.

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use gatehouse::{
    cli::globals::GlobalArgs,
    components::NavigationShell,
    gatehouse::{router, AppState},
    layout::{Node, ParamView},
    routes::{app_routes, Page, RouteNode, RouteTree},
    session::{FixedSessionResolver, Session, SessionResolver},
};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

fn globals() -> Result<GlobalArgs> {
    Ok(GlobalArgs::new(
        Url::parse("https://app.example.com")?,
        Url::parse("https://idp.example.com")?,
    )?)
}

fn app(resolver: Arc<FixedSessionResolver>) -> Result<Router> {
    let resolver: Arc<dyn SessionResolver> = resolver;
    Ok(router(AppState::new(resolver, app_routes(), globals()?)))
}

struct PairPage;

impl Page for PairPage {
    fn title(&self, _params: &ParamView) -> String {
        "Pair".to_string()
    }

    fn render(&self, _session: &Session, params: &ParamView) -> Node {
        Node::element("p").child(Node::text(format!(
            "pair {}",
            params.get("id").unwrap_or_default()
        )))
    }
}

/// `/{id}/{id}`: the same capture name at two depths.
fn duplicate_capture_routes() -> RouteTree {
    RouteTree::new(
        RouteNode::new("/")
            .wrapper(Arc::new(NavigationShell::default()))
            .child(RouteNode::new("{id}").child(RouteNode::new("{id}").page(Arc::new(PairPage)))),
    )
}

fn alice() -> Session {
    Session::new("u-alice", "alice@example.com")
        .with_metadata("name", "Alice")
        .with_metadata("username", "alice")
}

async fn get(app: Router, uri: &str) -> Result<Response> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    Ok(app.oneshot(request).await?)
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn anonymous_profile_redirects_to_login() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(app(resolver.clone())?, "/profile").await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
    assert_eq!(resolver.calls(), 1);

    let body = body_text(response).await?;
    assert!(!body.contains("data-layout"));
    assert!(!body.contains("profile"));
    Ok(())
}

#[tokio::test]
async fn anonymous_unknown_path_redirects_instead_of_404() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(app(resolver)?, "/does/not/exist").await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
    Ok(())
}

#[tokio::test]
async fn authenticated_profile_nests_layouts_root_first() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::authenticated(alice()));
    let response = get(app(resolver.clone())?, "/profile/alice").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(resolver.calls(), 1);

    let body = body_text(response).await?;
    let shell = body
        .find(r#"data-layout="navigation-shell""#)
        .context("navigation shell missing")?;
    let profile = body
        .find(r#"data-layout="profile""#)
        .context("profile layout missing")?;
    let page = body
        .find(r#"class="profile""#)
        .context("profile page missing")?;

    assert!(shell < profile, "shell must wrap the profile layout");
    assert!(profile < page, "profile layout must wrap the page");
    assert!(body.contains(r#"data-username="alice""#));
    assert!(body.contains(r#"data-own="true""#));
    assert!(body.contains("@alice · Gatehouse"));
    assert!(body.contains(r#"href="https://app.example.com/profile/alice""#));
    Ok(())
}

#[tokio::test]
async fn authenticated_other_profile_hides_private_fields() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::authenticated(alice()));
    let response = get(app(resolver)?, "/profile/bob").await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(body.contains(r#"data-username="bob""#));
    assert!(body.contains(r#"data-own="false""#));
    assert!(body.contains("Viewing @bob"));
    assert!(!body.contains(">username<"));
    Ok(())
}

#[tokio::test]
async fn authenticated_dashboard_renders_inside_the_shell() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::authenticated(alice()));
    let response = get(app(resolver)?, "/").await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(body.contains(r#"data-layout="navigation-shell""#));
    assert!(!body.contains(r#"data-layout="profile""#));
    assert!(body.contains("Welcome, Alice"));
    Ok(())
}

#[tokio::test]
async fn authenticated_unknown_path_is_not_found_inside_the_shell() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::authenticated(alice()));

    for uri in ["/settings", "/profile/-bad-", "/profile/alice/extra"] {
        let response = get(app(resolver.clone())?, uri).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_text(response).await?;
        assert!(body.contains(r#"data-layout="navigation-shell""#), "{uri}");
        assert!(body.contains("Page not found"), "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_capture_is_not_found_inside_the_shell() -> Result<()> {
    let resolver: Arc<dyn SessionResolver> =
        Arc::new(FixedSessionResolver::authenticated(alice()));
    let app = router(AppState::new(resolver, duplicate_capture_routes(), globals()?));

    let response = get(app, "/1/2").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_text(response).await?;
    assert!(body.contains(r#"data-layout="navigation-shell""#));
    assert!(body.contains("Page not found"));
    assert!(!body.contains("pair "));
    Ok(())
}

#[tokio::test]
async fn callback_error_renders_auth_error_without_redirect() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(
        app(resolver.clone())?,
        "/auth/callback?error=access_denied&error_description=bad+code",
    )
    .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&response).is_none());
    assert_eq!(resolver.calls(), 0);

    let body = body_text(response).await?;
    assert!(body.contains("Authentication Error"));
    assert!(body.contains(r#"href="/auth/login""#));
    Ok(())
}

#[tokio::test]
async fn callback_success_shows_loading_interstitial() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(app(resolver)?, "/auth/callback").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("refresh")
            .and_then(|value| value.to_str().ok()),
        Some("1; url=/")
    );
    let body = body_text(response).await?;
    assert!(body.contains("Loading..."));
    Ok(())
}

#[tokio::test]
async fn login_links_to_the_identity_provider() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(app(resolver.clone())?, "/auth/login").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(resolver.calls(), 0);
    let body = body_text(response).await?;
    assert!(body.contains("https://idp.example.com/login?return_to="));
    Ok(())
}

#[tokio::test]
async fn health_is_public_and_tagged_with_request_id() -> Result<()> {
    let resolver = Arc::new(FixedSessionResolver::anonymous());
    let response = get(app(resolver.clone())?, "/health").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(resolver.calls(), 0);
    assert!(response.headers().contains_key("x-request-id"));

    let body = body_text(response).await?;
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    Ok(())
}
